use crate::{AnalysisRequest, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Analyze {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    FetchModelInfo,
}
