use radar_core::{update, AnalysisError, AnalyzerState, Msg};

#[test]
fn completion_without_request_is_noop() {
    let state = AnalyzerState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::AnalysisCompleted {
            request_id: 1,
            outcome: Err(AnalysisError::network("late")),
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn superseded_completion_is_noop() {
    let (state, _) = update(AnalyzerState::new(), Msg::ContentChanged("story".into()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let (mut state, _) = update(state, Msg::SubmitClicked);
    state.consume_dirty();

    let (mut next, effects) = update(
        state.clone(),
        Msg::AnalysisCompleted {
            request_id: 1,
            outcome: Err(AnalysisError::network("late")),
        },
    );

    assert!(!next.consume_dirty());
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
