use std::sync::{mpsc, Arc};

use radar_core::{Effect, Msg};
use radar_engine::{ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink};
use radar_logging::{radar_info, radar_warn};

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, EngineError> {
        radar_info!("Using analysis API at {}", settings.base_url);
        let sink = Arc::new(MsgSink::new(msg_tx));
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Analyze {
                    request_id,
                    request,
                } => {
                    radar_info!(
                        "Analyze request_id={} type={} len={}",
                        request_id,
                        request.input_type(),
                        request.payload_len()
                    );
                    self.engine.analyze(request_id, request);
                }
                Effect::FetchModelInfo => {
                    self.engine.fetch_model_info();
                }
            }
        }
    }
}

struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl MsgSink {
    fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { msg_tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::AnalysisCompleted { request_id, result } => {
                match &result {
                    Ok(analysis) => radar_info!(
                        "Request {} completed: score={} segments={}",
                        request_id,
                        analysis.score,
                        analysis.highlighted_segments.len()
                    ),
                    Err(err) => radar_warn!("Request {} failed ({}): {}", request_id, err.kind, err),
                }
                Msg::AnalysisCompleted {
                    request_id,
                    outcome: result,
                }
            }
            EngineEvent::ModelInfoLoaded { result } => {
                if let Err(err) = &result {
                    radar_warn!("Model info unavailable ({}): {}", err.kind, err);
                }
                Msg::ModelInfoLoaded(result)
            }
        };
        let _ = self.msg_tx.send(msg);
    }
}
