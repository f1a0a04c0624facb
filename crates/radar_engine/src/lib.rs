//! Radar engine: analysis API client and background request execution.
mod client;
mod engine;
mod types;

pub use client::{AnalysisApi, ClientSettings, ReqwestApiClient, DEFAULT_BASE_URL};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{EngineError, EngineEvent};
