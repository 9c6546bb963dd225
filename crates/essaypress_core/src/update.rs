use crate::{Effect, Msg, PipelineState, RunState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current state (a second plan while running, a
/// completion for a stage that is not current) are ignored rather than
/// panicking; the effect runner is the only caller and drives stages one at a
/// time.
pub fn update(mut state: PipelineState, msg: Msg) -> (PipelineState, Vec<Effect>) {
    let effects = match msg {
        Msg::PlanSubmitted(plan) => {
            if state.run() != RunState::Idle || plan.is_empty() {
                Vec::new()
            } else {
                let first = state.submit_plan(plan);
                vec![Effect::RunStage(first)]
            }
        }
        Msg::StageSucceeded { stage, outcome } => match state.run() {
            RunState::Running(current) if current == stage => match state.advance(stage, outcome) {
                Some(next) => vec![Effect::RunStage(next)],
                None => vec![Effect::EmitReport],
            },
            _ => Vec::new(),
        },
        Msg::StageFailed { stage, message } => match state.run() {
            RunState::Running(current) if current == stage => {
                state.fail(stage, message);
                vec![Effect::EmitReport]
            }
            _ => Vec::new(),
        },
    };

    (state, effects)
}
