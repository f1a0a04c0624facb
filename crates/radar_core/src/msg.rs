use crate::{AnalysisError, AnalysisResult, InputType, ModelInfo, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched between text and URL input.
    InputTypeChanged(InputType),
    /// User edited the text content buffer.
    ContentChanged(String),
    /// User edited the URL buffer.
    UrlChanged(String),
    /// User asked for the active input to be analyzed.
    SubmitClicked,
    /// Engine finished an analysis request.
    AnalysisCompleted {
        request_id: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
    /// User or startup asked for backend model metadata.
    ModelInfoRequested,
    /// Engine finished the model metadata request.
    ModelInfoLoaded(Result<ModelInfo, AnalysisError>),
}
