//! Operator-facing feedback panels.
//!
//! Two panels exist at most: a short advisory message and a failure panel.
//! Each is created on first use, survives scene activations, and is
//! destroyed only by dismissal. Showing a panel that is already up updates
//! it in place and recenters it instead of stacking a second one.

use std::cell::RefCell;
use std::rc::Rc;

use vigil_core::{PanelKind, Placement, Presenter};

#[derive(Debug)]
struct MessagePanel {
    text: String,
    placement: Placement,
}

#[derive(Debug)]
struct FailurePanel {
    text: String,
    active_contexts: Vec<String>,
    contexts_expanded: bool,
    placement: Placement,
}

pub struct FeedbackOverlay {
    presenter: Rc<dyn Presenter>,
    message: RefCell<Option<MessagePanel>>,
    failure: RefCell<Option<FailurePanel>>,
}

impl FeedbackOverlay {
    pub fn new(presenter: Rc<dyn Presenter>) -> Self {
        Self {
            presenter,
            message: RefCell::new(None),
            failure: RefCell::new(None),
        }
    }

    pub fn show_message(&self, text: &str) {
        let mut slot = self.message.borrow_mut();
        match slot.as_mut() {
            Some(panel) => {
                panel.text = text.to_string();
                panel.placement = Placement::Centered;
            }
            None => {
                *slot = Some(MessagePanel {
                    text: text.to_string(),
                    placement: Placement::Centered,
                });
            }
        }
        self.presenter.show_message(text);
        self.presenter.place(PanelKind::Message, Placement::Centered);
    }

    pub fn show_failure(&self, text: &str, active_contexts: &[String]) {
        let mut slot = self.failure.borrow_mut();
        match slot.as_mut() {
            Some(panel) => {
                text.clone_into(&mut panel.text);
                active_contexts.clone_into(&mut panel.active_contexts);
                panel.placement = Placement::Centered;
            }
            None => {
                *slot = Some(FailurePanel {
                    text: text.to_string(),
                    active_contexts: active_contexts.to_vec(),
                    contexts_expanded: false,
                    placement: Placement::Centered,
                });
            }
        }
        self.presenter.show_failure(text, active_contexts);
        self.presenter.place(PanelKind::Failure, Placement::Centered);
    }

    /// Operator moved a panel. Returns `false` if the panel is not showing.
    pub fn move_panel(&self, kind: PanelKind, placement: Placement) -> bool {
        let moved = match kind {
            PanelKind::Message => match self.message.borrow_mut().as_mut() {
                Some(panel) => {
                    panel.placement = placement;
                    true
                }
                None => false,
            },
            PanelKind::Failure => match self.failure.borrow_mut().as_mut() {
                Some(panel) => {
                    panel.placement = placement;
                    true
                }
                None => false,
            },
        };
        if moved {
            self.presenter.place(kind, placement);
        }
        moved
    }

    /// Expand or collapse the active scene list. Returns the new state.
    pub fn toggle_contexts(&self) -> Option<bool> {
        self.failure.borrow_mut().as_mut().map(|panel| {
            panel.contexts_expanded = !panel.contexts_expanded;
            panel.contexts_expanded
        })
    }

    /// Copy the failure text to the clipboard.
    pub fn copy_failure(&self) -> Option<String> {
        let text = self.failure.borrow().as_ref().map(|p| p.text.clone())?;
        self.presenter.copy_to_clipboard(&text);
        Some(text)
    }

    /// Destroy a panel. The next `show_*` recreates it fresh.
    pub fn dismiss(&self, kind: PanelKind) {
        let was_showing = match kind {
            PanelKind::Message => self.message.borrow_mut().take().is_some(),
            PanelKind::Failure => self.failure.borrow_mut().take().is_some(),
        };
        if was_showing {
            self.presenter.close(kind);
        }
    }

    #[must_use]
    pub fn is_showing(&self, kind: PanelKind) -> bool {
        match kind {
            PanelKind::Message => self.message.borrow().is_some(),
            PanelKind::Failure => self.failure.borrow().is_some(),
        }
    }

    #[must_use]
    pub fn placement(&self, kind: PanelKind) -> Option<Placement> {
        match kind {
            PanelKind::Message => self.message.borrow().as_ref().map(|p| p.placement),
            PanelKind::Failure => self.failure.borrow().as_ref().map(|p| p.placement),
        }
    }

    #[must_use]
    pub fn failure_text(&self) -> Option<String> {
        self.failure.borrow().as_ref().map(|p| p.text.clone())
    }

    #[must_use]
    pub fn failure_contexts(&self) -> Option<Vec<String>> {
        self.failure
            .borrow()
            .as_ref()
            .map(|p| p.active_contexts.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::headless::{PresenterCall, RecordingPresenter};

    fn overlay() -> (Rc<RecordingPresenter>, FeedbackOverlay) {
        let presenter = Rc::new(RecordingPresenter::default());
        let overlay = FeedbackOverlay::new(presenter.clone());
        (presenter, overlay)
    }

    #[test]
    fn second_show_recenters_instead_of_stacking() {
        let (_presenter, overlay) = overlay();
        overlay.show_failure("first", &[]);
        assert!(overlay.move_panel(PanelKind::Failure, Placement::Offset { x: 40.0, y: 10.0 }));

        overlay.show_failure("second", &["Main".to_string()]);
        assert_eq!(overlay.placement(PanelKind::Failure), Some(Placement::Centered));
        assert_eq!(overlay.failure_text().as_deref(), Some("second"));
        assert_eq!(overlay.failure_contexts(), Some(vec!["Main".to_string()]));
    }

    #[test]
    fn dismiss_destroys_and_next_show_recreates() {
        let (presenter, overlay) = overlay();
        overlay.show_failure("boom", &[]);
        assert_eq!(overlay.toggle_contexts(), Some(true));

        overlay.dismiss(PanelKind::Failure);
        assert!(!overlay.is_showing(PanelKind::Failure));
        assert!(presenter.calls().contains(&PresenterCall::Close(PanelKind::Failure)));

        overlay.show_failure("again", &[]);
        // Fresh panel starts collapsed.
        assert_eq!(overlay.toggle_contexts(), Some(true));
    }

    #[test]
    fn panels_are_independent() {
        let (_presenter, overlay) = overlay();
        overlay.show_message("Validating...");
        overlay.show_failure("boom", &[]);
        overlay.dismiss(PanelKind::Message);
        assert!(!overlay.is_showing(PanelKind::Message));
        assert!(overlay.is_showing(PanelKind::Failure));
    }

    #[test]
    fn copy_sends_failure_text_to_clipboard() {
        let (presenter, overlay) = overlay();
        assert_eq!(overlay.copy_failure(), None);
        overlay.show_failure("boom", &[]);
        assert_eq!(overlay.copy_failure().as_deref(), Some("boom"));
        assert!(
            presenter
                .calls()
                .contains(&PresenterCall::Copy("boom".to_string()))
        );
    }

    #[test]
    fn moving_a_hidden_panel_does_nothing() {
        let (presenter, overlay) = overlay();
        assert!(!overlay.move_panel(PanelKind::Message, Placement::Centered));
        assert!(presenter.calls().is_empty());
    }
}
