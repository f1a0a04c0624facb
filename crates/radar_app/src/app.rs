use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use radar_core::{update, AnalyzerState, AnalyzerViewModel, InputType, ModelStatus, Msg};
use radar_engine::{ClientSettings, EngineError};
use radar_logging::radar_error;

use crate::effects::EffectRunner;

/// Slack on top of the client timeouts before a pending completion is given up.
const WAIT_GRACE: Duration = Duration::from_secs(1);

/// One analyzer session: owns the state, runs effects, and applies completions.
pub struct Session {
    state: AnalyzerState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    wait_limit: Duration,
}

impl Session {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let wait_limit = settings.connect_timeout + settings.request_timeout + WAIT_GRACE;
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let runner = EffectRunner::new(settings, msg_tx)?;
        Ok(Self {
            state: AnalyzerState::new(),
            runner,
            msg_rx,
            wait_limit,
        })
    }

    pub fn state(&self) -> &AnalyzerState {
        &self.state
    }

    pub fn view(&self) -> AnalyzerViewModel {
        self.state.view()
    }

    /// Applies one message. Returns the view when something visible changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AnalyzerViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty.then(|| self.state.view())
    }

    /// Sets the input for `input_type` and submits it.
    pub fn submit(&mut self, input_type: InputType, input: String) {
        self.dispatch(Msg::InputTypeChanged(input_type));
        match input_type {
            InputType::Text => self.dispatch(Msg::ContentChanged(input)),
            InputType::Url => self.dispatch(Msg::UrlChanged(input)),
        };
        self.dispatch(Msg::SubmitClicked);
    }

    /// Empties both input buffers, which also drops any shown result or error.
    pub fn clear(&mut self) -> Option<AnalyzerViewModel> {
        let content = self.dispatch(Msg::ContentChanged(String::new()));
        let url = self.dispatch(Msg::UrlChanged(String::new()));
        url.or(content)
    }

    /// Blocks until no request is in flight.
    pub fn wait_until_idle(&mut self) {
        while self.state.is_analyzing() {
            if !self.receive_one() {
                return;
            }
        }
    }

    /// Requests model info and blocks until the outcome is known.
    pub fn load_model_info(&mut self) {
        self.dispatch(Msg::ModelInfoRequested);
        while *self.state.model_status() == ModelStatus::Unknown {
            if !self.receive_one() {
                return;
            }
        }
    }

    fn receive_one(&mut self) -> bool {
        match next_msg(&self.msg_rx, self.wait_limit) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }
}

/// Waits at most `limit` for the engine's next message.
fn next_msg(msg_rx: &mpsc::Receiver<Msg>, limit: Duration) -> Option<Msg> {
    match msg_rx.recv_timeout(limit) {
        Ok(msg) => Some(msg),
        Err(RecvTimeoutError::Timeout) => {
            radar_error!("No completion from the engine within {:?}", limit);
            None
        }
        Err(RecvTimeoutError::Disconnected) => {
            radar_error!("Engine stopped before the request completed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use radar_core::Msg;
    use radar_engine::ClientSettings;

    use super::{next_msg, Session};

    #[test]
    fn silent_engine_stops_the_wait() {
        let (_msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let started = Instant::now();
        assert_eq!(next_msg(&msg_rx, Duration::from_millis(50)), None);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn dropped_engine_stops_the_wait() {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        drop(msg_tx);
        assert_eq!(next_msg(&msg_rx, Duration::from_secs(5)), None);
    }

    #[test]
    fn queued_message_is_returned() {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        msg_tx.send(Msg::SubmitClicked).unwrap();
        assert_eq!(
            next_msg(&msg_rx, Duration::from_millis(50)),
            Some(Msg::SubmitClicked)
        );
    }

    #[test]
    fn clear_empties_both_buffers_and_the_error() {
        let mut session = Session::new(ClientSettings::default()).unwrap();
        session.dispatch(Msg::UrlChanged("https://example.com".into()));
        session.dispatch(Msg::ContentChanged("   ".into()));
        session.dispatch(Msg::SubmitClicked);
        assert!(session.state().error().is_some());

        let view = session.clear().expect("visible change");

        assert_eq!(view.form.input_content, "");
        assert_eq!(view.form.url, "");
        assert!(view.error.is_none());
        assert!(view.report.is_none());
    }
}
