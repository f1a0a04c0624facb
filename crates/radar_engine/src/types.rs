use std::io;

use radar_core::{AnalysisError, AnalysisResult, ModelInfo, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<AnalysisResult, AnalysisError>,
    },
    ModelInfoLoaded {
        result: Result<ModelInfo, AnalysisError>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] io::Error),
}
