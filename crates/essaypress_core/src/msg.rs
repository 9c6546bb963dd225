use crate::{PipelineStage, StageOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The CLI submitted the stages to run, in order.
    PlanSubmitted(Vec<PipelineStage>),
    /// The effect runner finished a stage successfully.
    StageSucceeded {
        stage: PipelineStage,
        outcome: StageOutcome,
    },
    /// The effect runner hit a stage-fatal error.
    StageFailed {
        stage: PipelineStage,
        message: String,
    },
}
