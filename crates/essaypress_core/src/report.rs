use crate::{PipelineStage, PipelineState, RunState, SkippedArticle, StageFailure, StageOutcome};

/// End-of-run summary, rendered once after the last stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    outcomes: Vec<(PipelineStage, StageOutcome)>,
    failure: Option<StageFailure>,
    done: bool,
}

impl RunReport {
    pub fn from_state(state: &PipelineState) -> Self {
        Self {
            outcomes: state.outcomes().to_vec(),
            failure: state.failure().cloned(),
            done: state.run() == RunState::Done,
        }
    }

    /// A run succeeded only if every planned stage completed.
    pub fn succeeded(&self) -> bool {
        self.done && self.failure.is_none()
    }

    /// Human-readable summary lines, one per stage plus skip details.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (stage, outcome) in &self.outcomes {
            match outcome {
                StageOutcome::Fetched {
                    found,
                    written,
                    skipped,
                } => {
                    lines.push(format!(
                        "{stage}: wrote {written} of {found} essays ({} skipped)",
                        skipped.len()
                    ));
                    for skip in skipped {
                        lines.push(render_skip(skip));
                    }
                }
                StageOutcome::Merged { inputs, output } => {
                    lines.push(format!("{stage}: merged {inputs} files into {output}"));
                }
                StageOutcome::EpubBuilt { inputs, output } => {
                    lines.push(format!("{stage}: built {output} from {inputs} files"));
                }
                StageOutcome::PdfBuilt { output } => {
                    lines.push(format!("{stage}: built {output}"));
                }
                StageOutcome::Counted { words, articles } => {
                    lines.push(format!("{stage}: {words} words across {articles} articles"));
                }
            }
        }
        if let Some(failure) = &self.failure {
            lines.push(format!("failed at {}: {}", failure.stage, failure.message));
        }
        lines
    }
}

fn render_skip(skip: &SkippedArticle) -> String {
    format!(
        "  skipped {:03} {} ({})",
        skip.sequence, skip.url, skip.reason
    )
}
