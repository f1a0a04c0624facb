use crate::{AnalyzerState, Effect, ModelStatus, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AnalyzerState, msg: Msg) -> (AnalyzerState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputTypeChanged(input_type) => {
            state.set_input_type(input_type);
            Vec::new()
        }
        Msg::ContentChanged(content) => {
            state.set_input_content(content);
            Vec::new()
        }
        Msg::UrlChanged(url) => {
            state.set_url(url);
            Vec::new()
        }
        Msg::SubmitClicked => match state.validated_request() {
            Ok(request) => {
                // A newer id supersedes whatever is still in flight.
                let request_id = state.begin_request();
                vec![Effect::Analyze {
                    request_id,
                    request,
                }]
            }
            Err(error) => {
                state.reject_submit(error);
                Vec::new()
            }
        },
        Msg::AnalysisCompleted {
            request_id,
            outcome,
        } => {
            // Stale completions are dropped without touching state.
            state.complete_request(request_id, outcome);
            Vec::new()
        }
        Msg::ModelInfoRequested => {
            state.set_model_status(ModelStatus::Unknown);
            vec![Effect::FetchModelInfo]
        }
        Msg::ModelInfoLoaded(outcome) => {
            let status = match outcome {
                Ok(info) => ModelStatus::Available(info),
                Err(error) => ModelStatus::Unavailable(error.message),
            };
            state.set_model_status(status);
            Vec::new()
        }
    };

    (state, effects)
}
