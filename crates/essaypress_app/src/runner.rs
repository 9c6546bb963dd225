//! Effect runner: executes the state machine's effects against the engine.

use std::collections::VecDeque;
use std::process::ExitCode;

use essaypress_core::{
    update, Effect, Msg, PipelineStage, PipelineState, RunReport, SkippedArticle, StageOutcome,
};
use essaypress_engine::{
    clean_outputs, count_corpus, run_epub, run_fetch, run_merge, run_pdf, ArchiveConfig,
    FetchSettings, Html2MdConverter, ReqwestFetcher, SystemToolRunner, WhitespaceWordCounter,
};

/// Drive the requested stages to completion. The state machine decides what
/// runs next; this loop only executes effects and feeds results back.
pub async fn drive(plan: Vec<PipelineStage>, config: ArchiveConfig) -> ExitCode {
    let fetcher = match ReqwestFetcher::new(FetchSettings::default()) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            log::error!("could not build the http client: {err}");
            return ExitCode::FAILURE;
        }
    };
    let tools = SystemToolRunner::new(config.tool_timeout);

    let mut state = PipelineState::new();
    let mut pending: VecDeque<Effect> = VecDeque::new();
    let (next, effects) = update(state, Msg::PlanSubmitted(plan));
    state = next;
    pending.extend(effects);

    while let Some(effect) = pending.pop_front() {
        match effect {
            Effect::RunStage(stage) => {
                log::info!("running {stage}");
                let msg = execute_stage(stage, &config, &fetcher, &tools).await;
                let (next, effects) = update(state, msg);
                state = next;
                pending.extend(effects);
            }
            Effect::EmitReport => {
                for line in RunReport::from_state(&state).lines() {
                    log::info!("{line}");
                }
            }
        }
    }

    if RunReport::from_state(&state).succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn execute_stage(
    stage: PipelineStage,
    config: &ArchiveConfig,
    fetcher: &ReqwestFetcher,
    tools: &SystemToolRunner,
) -> Msg {
    let result = match stage {
        PipelineStage::Fetch => run_fetch(config, fetcher, &Html2MdConverter)
            .await
            .map(|report| StageOutcome::Fetched {
                found: report.found,
                written: report.written,
                skipped: report
                    .skipped
                    .into_iter()
                    .map(|skip| SkippedArticle {
                        sequence: skip.sequence,
                        url: skip.url,
                        reason: skip.reason.to_string(),
                    })
                    .collect(),
            })
            .map_err(|err| err.to_string()),
        PipelineStage::Merge => run_merge(config, tools)
            .await
            .map(|summary| StageOutcome::Merged {
                inputs: summary.inputs,
                output: summary.output.display().to_string(),
            })
            .map_err(|err| err.to_string()),
        PipelineStage::Epub => run_epub(config, tools)
            .await
            .map(|summary| StageOutcome::EpubBuilt {
                inputs: summary.inputs,
                output: summary.output.display().to_string(),
            })
            .map_err(|err| err.to_string()),
        PipelineStage::Pdf => run_pdf(config, tools)
            .await
            .map(|summary| StageOutcome::PdfBuilt {
                output: summary.output.display().to_string(),
            })
            .map_err(|err| err.to_string()),
        PipelineStage::Wordcount => count_corpus(&config.output_dir, &WhitespaceWordCounter)
            .map(|count| StageOutcome::Counted {
                words: count.words,
                articles: count.articles,
            })
            .map_err(|err| format!("could not scan {}: {err}", config.output_dir.display())),
    };

    match result {
        Ok(outcome) => Msg::StageSucceeded { stage, outcome },
        Err(message) => {
            log::error!("{stage} failed: {message}");
            Msg::StageFailed { stage, message }
        }
    }
}

/// The `clean` subcommand: not a pipeline stage, just filesystem removal.
pub fn clean(config: &ArchiveConfig) -> ExitCode {
    match clean_outputs(config) {
        Ok(removed) => {
            for path in &removed {
                log::debug!("removed {}", path.display());
            }
            log::info!("cleaned {} generated paths", removed.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("clean failed: {err}");
            ExitCode::FAILURE
        }
    }
}
