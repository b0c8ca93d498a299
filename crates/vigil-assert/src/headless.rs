//! A presenter for hosts without a window: records every call.

use std::cell::RefCell;

use vigil_core::{PanelKind, Placement, Presenter};

#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    Message(String),
    Failure {
        text: String,
        active_contexts: Vec<String>,
    },
    Place(PanelKind, Placement),
    Close(PanelKind),
    Copy(String),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    calls: RefCell<Vec<PresenterCall>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls.borrow().clone()
    }

    /// Texts of every failure panel shown, oldest first.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Failure { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PresenterCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Presenter for RecordingPresenter {
    fn show_message(&self, text: &str) {
        self.record(PresenterCall::Message(text.to_string()));
    }

    fn show_failure(&self, text: &str, active_contexts: &[String]) {
        self.record(PresenterCall::Failure {
            text: text.to_string(),
            active_contexts: active_contexts.to_vec(),
        });
    }

    fn place(&self, panel: PanelKind, placement: Placement) {
        self.record(PresenterCall::Place(panel, placement));
    }

    fn close(&self, panel: PanelKind) {
        self.record(PresenterCall::Close(panel));
    }

    fn copy_to_clipboard(&self, text: &str) {
        self.record(PresenterCall::Copy(text.to_string()));
    }
}
