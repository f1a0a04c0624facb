use radar_core::{update, AnalysisError, AnalysisResult, AnalyzerState, Effect, Msg};

fn result_with_score(score: f64) -> AnalysisResult {
    AnalysisResult {
        score,
        category: "Somewhat Credible".to_string(),
        highlighted_segments: Vec::new(),
        url: None,
        title: None,
        source_metadata: None,
    }
}

fn submit(state: AnalyzerState) -> (AnalyzerState, u64) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    let request_id = match effects.as_slice() {
        [Effect::Analyze { request_id, .. }] => *request_id,
        other => panic!("expected one analyze effect, got {other:?}"),
    };
    (state, request_id)
}

#[test]
fn request_ids_increase_monotonically() {
    let (state, _) = update(AnalyzerState::new(), Msg::ContentChanged("story".into()));
    let (state, first) = submit(state);
    let (state, second) = submit(state);
    let (state, third) = submit(state);

    assert_eq!((first, second, third), (1, 2, 3));
    assert_eq!(state.in_flight(), Some(3));
}

#[test]
fn superseded_completion_is_ignored() {
    let (state, _) = update(AnalyzerState::new(), Msg::ContentChanged("story".into()));
    let (state, first) = submit(state);
    let (state, second) = submit(state);

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: first,
            outcome: Ok(result_with_score(0.1)),
        },
    );
    assert!(state.is_analyzing(), "late response must not end the newer request");
    assert!(state.result().is_none());

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: second,
            outcome: Ok(result_with_score(0.55)),
        },
    );
    assert!(!state.is_analyzing());
    assert_eq!(state.result().map(|r| r.score), Some(0.55));
}

#[test]
fn late_completion_after_newer_one_is_ignored() {
    let (state, _) = update(AnalyzerState::new(), Msg::ContentChanged("story".into()));
    let (state, first) = submit(state);
    let (state, second) = submit(state);

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: second,
            outcome: Ok(result_with_score(0.9)),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: first,
            outcome: Err(AnalysisError::network("timeout")),
        },
    );

    assert_eq!(state.result().map(|r| r.score), Some(0.9));
    assert!(state.error().is_none());
    state.consume_dirty();
    assert!(!state.consume_dirty());
}

#[test]
fn completion_after_edit_still_applies_to_latest_request() {
    let (state, _) = update(AnalyzerState::new(), Msg::ContentChanged("story".into()));
    let (state, request_id) = submit(state);
    let (state, _) = update(state, Msg::ContentChanged("story, edited".into()));
    assert!(state.is_analyzing());

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Ok(result_with_score(0.3)),
        },
    );
    assert!(!state.is_analyzing());
    assert!(state.result().is_some());
}

#[test]
fn failed_validation_supersedes_in_flight_request() {
    let (state, _) = update(AnalyzerState::new(), Msg::ContentChanged("story".into()));
    let (state, request_id) = submit(state);
    let (state, _) = update(state, Msg::ContentChanged("   ".into()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert!(!state.is_analyzing());

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Ok(result_with_score(0.8)),
        },
    );
    assert!(state.result().is_none());
    assert_eq!(
        state.error().map(|e| e.message.as_str()),
        Some("Please enter some text to analyze")
    );
}

#[test]
fn completion_without_any_request_is_ignored() {
    let state = AnalyzerState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::AnalysisCompleted {
            request_id: 42,
            outcome: Ok(result_with_score(0.5)),
        },
    );

    assert_eq!(next, state);
    assert!(effects.is_empty());
}
