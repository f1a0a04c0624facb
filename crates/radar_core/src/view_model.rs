use crate::format::{format_score, ScoreBand};
use crate::{AnalysisResult, AnalyzerState, Category, InputType, ModelStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerViewModel {
    pub form: FormView,
    pub error: Option<String>,
    pub report: Option<ReportView>,
    pub backend: BackendStatusView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub input_type: InputType,
    pub input_content: String,
    pub url: String,
    /// Submitting is disabled while this is set.
    pub is_analyzing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub source: Option<SourceView>,
    pub score: ScoreView,
    pub findings: Findings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceView {
    pub url: String,
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreView {
    pub percent_label: String,
    pub category: Category,
    pub band: ScoreBand,
    /// Bar fill in `[0, 1]`.
    pub fill: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Findings {
    NoIssues,
    Segments(Vec<SegmentView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentView {
    pub text: String,
    pub reason: String,
    pub confidence_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatusView {
    #[default]
    Unknown,
    Available {
        model_name: Option<String>,
        model_version: Option<String>,
    },
    Unavailable {
        reason: String,
    },
}

impl AnalyzerViewModel {
    pub(crate) fn from_state(state: &AnalyzerState) -> Self {
        Self {
            form: FormView {
                input_type: state.input_type(),
                input_content: state.input_content().to_string(),
                url: state.url().to_string(),
                is_analyzing: state.is_analyzing(),
            },
            error: state.error().map(|error| error.message.clone()),
            report: state.result().map(ReportView::from_result),
            backend: BackendStatusView::from_status(state.model_status()),
        }
    }
}

impl ReportView {
    fn from_result(result: &AnalysisResult) -> Self {
        let band = ScoreBand::of(result.score);
        let fill = if result.score.is_nan() {
            0.0
        } else {
            result.score.clamp(0.0, 1.0)
        };
        let findings = if result.highlighted_segments.is_empty() {
            Findings::NoIssues
        } else {
            Findings::Segments(
                result
                    .highlighted_segments
                    .iter()
                    .map(|segment| SegmentView {
                        text: segment.text.clone(),
                        reason: segment.reason.clone(),
                        confidence_label: format_score(segment.confidence),
                    })
                    .collect(),
            )
        };

        Self {
            source: result.url.as_ref().map(|url| {
                let metadata = result.source_metadata.clone().unwrap_or_default();
                SourceView {
                    url: url.clone(),
                    title: result.title.clone(),
                    published_date: metadata.published_date,
                    author: metadata.author,
                    source: metadata.source,
                }
            }),
            score: ScoreView {
                percent_label: format_score(result.score),
                category: band.category(),
                band,
                fill,
            },
            findings,
        }
    }
}

impl BackendStatusView {
    fn from_status(status: &ModelStatus) -> Self {
        match status {
            ModelStatus::Unknown => BackendStatusView::Unknown,
            ModelStatus::Available(info) => BackendStatusView::Available {
                model_name: info.model_name.clone(),
                model_version: info.model_version.clone(),
            },
            ModelStatus::Unavailable(reason) => BackendStatusView::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}
