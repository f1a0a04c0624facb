//! Radar core: pure analyzer state machine, wire types and view-model helpers.
mod effect;
mod error;
mod format;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{AnalysisError, ErrorKind};
pub use format::{
    background_class_of, category_of, color_class_of, format_score, gradient_class_of,
    is_valid_url, truncate_text, Category, ScoreBand, DEFAULT_TRUNCATE_LENGTH,
};
pub use msg::Msg;
pub use state::{AnalyzerState, ModelStatus};
pub use types::{
    AnalysisRequest, AnalysisResult, HighlightedSegment, InputType, ModelInfo, RequestId,
    SourceMetadata,
};
pub use update::update;
pub use view_model::{
    AnalyzerViewModel, BackendStatusView, Findings, FormView, ReportView, ScoreView,
    SegmentView, SourceView,
};
