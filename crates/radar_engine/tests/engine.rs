use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use radar_core::{AnalysisError, AnalysisRequest, AnalysisResult, ModelInfo};
use radar_engine::{AnalysisApi, ChannelEventSink, EngineEvent, EngineHandle};

struct FakeApi;

fn result_with_score(score: f64) -> AnalysisResult {
    AnalysisResult {
        score,
        category: "Credible".to_string(),
        highlighted_segments: Vec::new(),
        url: None,
        title: None,
        source_metadata: None,
    }
}

#[async_trait::async_trait]
impl AnalysisApi for FakeApi {
    async fn analyze_content(&self, content: &str) -> Result<AnalysisResult, AnalysisError> {
        if content == "slow" {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Ok(result_with_score(0.75))
    }

    async fn analyze_url(&self, _url: &str) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::server(400, "Could not extract article"))
    }

    async fn model_info(&self) -> Result<ModelInfo, AnalysisError> {
        Ok(ModelInfo {
            model_name: Some("fake".to_string()),
            ..ModelInfo::default()
        })
    }
}

fn start_engine() -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    radar_logging::initialize_for_tests();
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::with_api(Arc::new(FakeApi), Arc::new(ChannelEventSink::new(tx)))
        .expect("engine starts");
    (engine, rx)
}

#[test]
fn analysis_completion_carries_request_id() {
    let (engine, rx) = start_engine();
    engine.analyze(
        7,
        AnalysisRequest::Text {
            content: "story".to_string(),
        },
    );

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        EngineEvent::AnalysisCompleted {
            request_id: 7,
            result: Ok(result_with_score(0.75)),
        }
    );
}

#[test]
fn failures_are_reported_as_events() {
    let (engine, rx) = start_engine();
    engine.analyze(
        1,
        AnalysisRequest::Url {
            url: "https://example.com".to_string(),
        },
    );

    match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
        EngineEvent::AnalysisCompleted { request_id, result } => {
            assert_eq!(request_id, 1);
            assert_eq!(result.unwrap_err().message, "Could not extract article");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn requests_run_concurrently_and_may_complete_out_of_order() {
    let (engine, rx) = start_engine();
    engine.analyze(
        1,
        AnalysisRequest::Text {
            content: "slow".to_string(),
        },
    );
    engine.analyze(
        2,
        AnalysisRequest::Text {
            content: "fast".to_string(),
        },
    );

    let ids: Vec<u64> = (0..2)
        .map(|_| match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
            EngineEvent::AnalysisCompleted { request_id, .. } => request_id,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn model_info_is_reported() {
    let (engine, rx) = start_engine();
    engine.fetch_model_info();

    match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
        EngineEvent::ModelInfoLoaded { result } => {
            assert_eq!(result.unwrap().model_name.as_deref(), Some("fake"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
