//! With the `assertions` feature off every primitive is a no-op.
//!
//! Run with `cargo test -p vigil-assert --no-default-features`.
#![cfg(not(feature = "assertions"))]

use std::rc::Rc;

use vigil_assert::headless::RecordingPresenter;
use vigil_assert::{Asserter, FeedbackOverlay, MemoryLogSink, Phase, Session, assertions_enabled};
use vigil_core::ContextRef;

#[test]
fn primitives_never_fail_report_or_log() {
    let presenter = Rc::new(RecordingPresenter::default());
    let overlay = FeedbackOverlay::new(presenter.clone());
    let sink = MemoryLogSink::new();
    let session = Session::authoring();
    session.set_phase(Phase::EnteringRunning);
    let a = Asserter::new(&overlay, &sink, &session);
    let ctx = ContextRef::Unattributed;

    assert!(!assertions_enabled());
    assert!(a.assert_true(false, &ctx, "x").is_ok());
    assert!(a.assert_false(true, &ctx, "x").is_ok());
    assert!(a.assert_eq(&1, &2, &ctx, "x").is_ok());
    assert!(a.assert_unique([1, 1], &ctx, "x").is_ok());
    assert!(a.assert_in_range(&99, &0, &1, &ctx, "x").is_ok());
    assert!(a.assert_not_empty(Vec::<u8>::new(), &ctx, "x").is_ok());
    assert!(a.assert_some::<u8>(None, &ctx, "x").is_ok());

    assert!(presenter.calls().is_empty());
    assert!(sink.is_empty());
    assert!(!session.is_transition_suspended());
}
