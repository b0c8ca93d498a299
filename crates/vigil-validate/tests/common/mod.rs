//! Shared fixtures for vigil-validate integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use vigil_assert::headless::RecordingPresenter;
use vigil_assert::{Asserter, FeedbackOverlay, MemoryLogSink, Session};
use vigil_core::{ContextRef, Violation};
use vigil_validate::{Assertable, ValidatorRegistry};

pub struct Harness {
    pub presenter: Rc<RecordingPresenter>,
    pub overlay: FeedbackOverlay,
    pub sink: MemoryLogSink,
    pub session: Session,
}

impl Harness {
    pub fn new(session: Session) -> Self {
        let presenter = Rc::new(RecordingPresenter::default());
        Self {
            overlay: FeedbackOverlay::new(presenter.clone()),
            presenter,
            sink: MemoryLogSink::new(),
            session,
        }
    }

    pub fn authoring() -> Self {
        Self::new(Session::authoring())
    }

    pub fn asserter(&self) -> Asserter<'_> {
        Asserter::new(&self.overlay, &self.sink, &self.session)
    }
}

/// A configuration value that is valid when `ok` holds.
pub struct Setting {
    pub ok: bool,
    pub message: &'static str,
}

impl Setting {
    pub const fn valid() -> Self {
        Self {
            ok: true,
            message: "unused",
        }
    }

    pub const fn invalid(message: &'static str) -> Self {
        Self { ok: false, message }
    }
}

impl Assertable for Setting {
    fn validate(&self, asserter: &Asserter<'_>, context: &ContextRef) -> Result<(), Violation> {
        asserter.assert_true(self.ok, context, self.message)
    }
}

/// Marker part whose validator counts invocations.
pub struct Probe;

pub fn registry_with_probe() -> (ValidatorRegistry, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut registry = ValidatorRegistry::new();
    registry.register_assertable::<Setting>();
    registry.register::<Probe, _>(move |_, _, _| {
        counter.set(counter.get() + 1);
        Ok(())
    });
    (registry, calls)
}
