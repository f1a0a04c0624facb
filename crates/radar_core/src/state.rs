use crate::format::is_valid_url;
use crate::view_model::AnalyzerViewModel;
use crate::{AnalysisError, AnalysisRequest, AnalysisResult, InputType, ModelInfo, RequestId};

const EMPTY_TEXT_MESSAGE: &str = "Please enter some text to analyze";
const EMPTY_URL_MESSAGE: &str = "Please enter a URL to analyze";
const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelStatus {
    #[default]
    Unknown,
    Available(ModelInfo),
    Unavailable(String),
}

/// State of one analyzer session.
///
/// `result` and `error` are never both set, and `is_analyzing()` holds exactly
/// while a request id is in flight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyzerState {
    input_type: InputType,
    input_content: String,
    url: String,
    result: Option<AnalysisResult>,
    error: Option<AnalysisError>,
    latest_request: RequestId,
    in_flight: Option<RequestId>,
    model_status: ModelStatus,
    dirty: bool,
}

impl AnalyzerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AnalyzerViewModel {
        AnalyzerViewModel::from_state(self)
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn input_content(&self) -> &str {
        &self.input_content
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        self.error.as_ref()
    }

    pub fn model_status(&self) -> &ModelStatus {
        &self.model_status
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input_type(&mut self, input_type: InputType) {
        self.input_type = input_type;
        self.invalidate_outcome();
    }

    pub(crate) fn set_input_content(&mut self, content: String) {
        self.input_content = content;
        self.invalidate_outcome();
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
        self.invalidate_outcome();
    }

    /// Builds the request for the active input, or the message to show instead.
    pub(crate) fn validated_request(&self) -> Result<AnalysisRequest, AnalysisError> {
        match self.input_type {
            InputType::Text => {
                if self.input_content.trim().is_empty() {
                    return Err(AnalysisError::validation(EMPTY_TEXT_MESSAGE));
                }
                Ok(AnalysisRequest::Text {
                    content: self.input_content.clone(),
                })
            }
            InputType::Url => {
                let url = self.url.trim();
                if url.is_empty() {
                    return Err(AnalysisError::validation(EMPTY_URL_MESSAGE));
                }
                if !is_valid_url(url) {
                    return Err(AnalysisError::validation(INVALID_URL_MESSAGE));
                }
                Ok(AnalysisRequest::Url {
                    url: url.to_string(),
                })
            }
        }
    }

    /// Issues the next request id and marks it as the only one whose completion applies.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.latest_request += 1;
        self.in_flight = Some(self.latest_request);
        self.result = None;
        self.error = None;
        self.dirty = true;
        self.latest_request
    }

    pub(crate) fn reject_submit(&mut self, error: AnalysisError) {
        self.in_flight = None;
        self.result = None;
        self.error = Some(error);
        self.dirty = true;
    }

    /// Applies a completion. Returns false when `request_id` is not the one in flight.
    pub(crate) fn complete_request(
        &mut self,
        request_id: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(error) => {
                self.result = None;
                self.error = Some(error);
            }
        }
        self.dirty = true;
        true
    }

    pub(crate) fn set_model_status(&mut self, status: ModelStatus) {
        self.model_status = status;
        self.dirty = true;
    }

    fn invalidate_outcome(&mut self) {
        self.result = None;
        self.error = None;
        self.dirty = true;
    }
}
