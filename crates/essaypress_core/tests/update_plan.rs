use std::sync::Once;

use essaypress_core::{
    update, Effect, Msg, PipelineStage, PipelineState, RunState, StageOutcome,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(press_logging::initialize_for_tests);
}

fn succeed(stage: PipelineStage) -> Msg {
    let outcome = match stage {
        PipelineStage::Fetch => StageOutcome::Fetched {
            found: 2,
            written: 2,
            skipped: Vec::new(),
        },
        PipelineStage::Merge => StageOutcome::Merged {
            inputs: 2,
            output: "graham.md".to_string(),
        },
        PipelineStage::Epub => StageOutcome::EpubBuilt {
            inputs: 2,
            output: "graham.epub".to_string(),
        },
        PipelineStage::Pdf => StageOutcome::PdfBuilt {
            output: "graham.pdf".to_string(),
        },
        PipelineStage::Wordcount => StageOutcome::Counted {
            words: 100,
            articles: 2,
        },
    };
    Msg::StageSucceeded { stage, outcome }
}

#[test]
fn plan_starts_first_stage() {
    init_logging();
    let state = PipelineState::new();

    let (state, effects) = update(
        state,
        Msg::PlanSubmitted(vec![PipelineStage::Fetch, PipelineStage::Merge]),
    );

    assert_eq!(state.run(), RunState::Running(PipelineStage::Fetch));
    assert_eq!(effects, vec![Effect::RunStage(PipelineStage::Fetch)]);
}

#[test]
fn empty_plan_is_ignored() {
    init_logging();
    let state = PipelineState::new();

    let (state, effects) = update(state, Msg::PlanSubmitted(Vec::new()));

    assert_eq!(state.run(), RunState::Idle);
    assert!(effects.is_empty());
}

#[test]
fn stages_advance_in_plan_order() {
    init_logging();
    let state = PipelineState::new();
    let (state, _) = update(state, Msg::PlanSubmitted(PipelineStage::full_plan()));

    let (state, effects) = update(state, succeed(PipelineStage::Fetch));
    assert_eq!(effects, vec![Effect::RunStage(PipelineStage::Merge)]);
    assert_eq!(state.run(), RunState::Running(PipelineStage::Merge));

    let (state, effects) = update(state, succeed(PipelineStage::Merge));
    assert_eq!(effects, vec![Effect::RunStage(PipelineStage::Epub)]);

    let (state, _) = update(state, succeed(PipelineStage::Epub));
    let (state, effects) = update(state, succeed(PipelineStage::Pdf));
    assert_eq!(effects, vec![Effect::RunStage(PipelineStage::Wordcount)]);

    let (state, effects) = update(state, succeed(PipelineStage::Wordcount));
    assert_eq!(state.run(), RunState::Done);
    assert_eq!(effects, vec![Effect::EmitReport]);
    assert_eq!(state.outcomes().len(), 5);
}

#[test]
fn single_stage_plan_completes_with_report() {
    init_logging();
    let state = PipelineState::new();
    let (state, _) = update(state, Msg::PlanSubmitted(vec![PipelineStage::Wordcount]));

    let (state, effects) = update(state, succeed(PipelineStage::Wordcount));

    assert_eq!(state.run(), RunState::Done);
    assert_eq!(effects, vec![Effect::EmitReport]);
}

#[test]
fn plan_while_running_is_ignored() {
    init_logging();
    let state = PipelineState::new();
    let (state, _) = update(state, Msg::PlanSubmitted(vec![PipelineStage::Fetch]));

    let (state, effects) = update(state, Msg::PlanSubmitted(vec![PipelineStage::Merge]));

    assert_eq!(state.run(), RunState::Running(PipelineStage::Fetch));
    assert_eq!(state.plan(), &[PipelineStage::Fetch]);
    assert!(effects.is_empty());
}

#[test]
fn completion_for_wrong_stage_is_ignored() {
    init_logging();
    let state = PipelineState::new();
    let (state, _) = update(state, Msg::PlanSubmitted(vec![PipelineStage::Fetch]));

    let (state, effects) = update(state, succeed(PipelineStage::Merge));

    assert_eq!(state.run(), RunState::Running(PipelineStage::Fetch));
    assert!(effects.is_empty());
    assert!(state.outcomes().is_empty());
}
