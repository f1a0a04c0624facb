use std::sync::{mpsc, Arc};
use std::thread;

use radar_core::{AnalysisRequest, RequestId};
use radar_logging::radar_debug;

use crate::client::{AnalysisApi, ClientSettings, ReqwestApiClient};
use crate::{EngineError, EngineEvent};

/// Receiver of engine completions. Called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    FetchModelInfo,
}

/// Runs API calls on a background runtime so the caller never blocks on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        Self::with_api(Arc::new(ReqwestApiClient::new(settings)), sink)
    }

    pub fn with_api(
        api: Arc<dyn AnalysisApi>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("radar-engine-worker")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("radar-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, sink.as_ref()).await;
                    });
                }
                radar_debug!("Engine command channel closed");
            })
            .map_err(EngineError::Spawn)?;

        Ok(Self { cmd_tx })
    }

    pub fn analyze(&self, request_id: RequestId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            request_id,
            request,
        });
    }

    pub fn fetch_model_info(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchModelInfo);
    }
}

async fn handle_command(api: &dyn AnalysisApi, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Analyze {
            request_id,
            request,
        } => {
            let result = api.analyze(&request).await;
            sink.emit(EngineEvent::AnalysisCompleted { request_id, result });
        }
        EngineCommand::FetchModelInfo => {
            let result = api.model_info().await;
            sink.emit(EngineEvent::ModelInfoLoaded { result });
        }
    }
}
