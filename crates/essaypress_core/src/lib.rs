//! Essaypress core: pure pipeline state machine and run reporting.
mod effect;
mod msg;
mod report;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use report::RunReport;
pub use state::{
    PipelineStage, PipelineState, RunState, SkippedArticle, StageFailure, StageOutcome,
};
pub use update::update;
