//! Gated check primitives and the single failure path.
//!
//! Every primitive computes its predicate inline and hands it to
//! [`Asserter::assert_true`] or [`Asserter::assert_false`]; those two are the
//! only callers of [`Asserter::fail`]. With the `assertions` feature off each
//! primitive returns before touching its arguments.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::HashSet;
use std::hash::Hash;

use vigil_core::{ContextRef, Violation};

use crate::log_sink::{LogEntry, LogSink, Severity};
use crate::overlay::FeedbackOverlay;
use crate::session::Session;

const ENABLED: bool = cfg!(feature = "assertions");

/// Whether assertion primitives were compiled in.
#[must_use]
pub const fn assertions_enabled() -> bool {
    ENABLED
}

macro_rules! live_or_return {
    () => {
        if !ENABLED {
            return Ok(());
        }
    };
}

/// The assertion facade.
///
/// Borrowed from the host for the length of a pass; cheap to copy.
#[derive(Clone, Copy)]
pub struct Asserter<'a> {
    overlay: &'a FeedbackOverlay,
    sink: &'a dyn LogSink,
    session: &'a Session,
}

impl<'a> Asserter<'a> {
    #[must_use]
    pub const fn new(
        overlay: &'a FeedbackOverlay,
        sink: &'a dyn LogSink,
        session: &'a Session,
    ) -> Self {
        Self {
            overlay,
            sink,
            session,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &'a Session {
        self.session
    }

    #[must_use]
    pub const fn overlay(&self) -> &'a FeedbackOverlay {
        self.overlay
    }

    /// Build a violation and report it.
    ///
    /// Escalating failures are logged, shown on the overlay, and may suspend a
    /// pending transition before the violation is handed back to the caller
    /// to raise. Non-escalating failures are only logged.
    pub fn fail(&self, message: &str, context: &ContextRef, escalate: bool) -> Violation {
        let violation = Violation::new(message, context.clone());
        self.report(&violation, escalate);
        violation
    }

    /// Report an existing violation through the failure path.
    pub fn report(&self, violation: &Violation, escalate: bool) {
        if !escalate {
            tracing::warn!(context = %violation.context(), "{}", violation.message());
            self.sink
                .append(&LogEntry::from_violation(violation, Severity::LogOnly));
            return;
        }

        tracing::error!(context = %violation.context(), "{}", violation.message());
        self.sink
            .append(&LogEntry::from_violation(violation, Severity::Escalated));

        let mut text = format!("{}\n\n{}", violation.message(), violation.context());
        let snapshot = Backtrace::capture();
        if snapshot.status() == BacktraceStatus::Captured {
            text.push_str("\n\n");
            text.push_str(&snapshot.to_string());
        }
        self.overlay
            .show_failure(&text, &self.session.active_scenes());

        if self.session.suspend_transition(violation) {
            tracing::warn!("suspending transition into running state");
        }
    }

    #[inline]
    pub fn assert_true(
        &self,
        condition: bool,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        if condition {
            Ok(())
        } else {
            Err(self.fail(message, context, true))
        }
    }

    #[inline]
    pub fn assert_false(
        &self,
        condition: bool,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        if condition {
            Err(self.fail(message, context, true))
        } else {
            Ok(())
        }
    }

    #[inline]
    pub fn assert_eq<T: PartialEq + ?Sized>(
        &self,
        actual: &T,
        expected: &T,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_true(actual == expected, context, message)
    }

    #[inline]
    pub fn assert_ne<T: PartialEq + ?Sized>(
        &self,
        actual: &T,
        unexpected: &T,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_false(actual == unexpected, context, message)
    }

    /// Both references point at the same object.
    #[inline]
    pub fn assert_same<T: ?Sized>(
        &self,
        actual: &T,
        expected: &T,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_true(std::ptr::eq(actual, expected), context, message)
    }

    #[inline]
    pub fn assert_not_same<T: ?Sized>(
        &self,
        actual: &T,
        other: &T,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_false(std::ptr::eq(actual, other), context, message)
    }

    #[inline]
    pub fn assert_some<T>(
        &self,
        value: Option<&T>,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_true(value.is_some(), context, message)
    }

    #[inline]
    pub fn assert_none<T>(
        &self,
        value: Option<&T>,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_false(value.is_some(), context, message)
    }

    #[inline]
    pub fn assert_contains<'i, T: PartialEq + 'i>(
        &self,
        items: impl IntoIterator<Item = &'i T>,
        item: &T,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        let found = items.into_iter().any(|candidate| candidate == item);
        self.assert_true(found, context, message)
    }

    #[inline]
    pub fn assert_not_contains<'i, T: PartialEq + 'i>(
        &self,
        items: impl IntoIterator<Item = &'i T>,
        item: &T,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        let found = items.into_iter().any(|candidate| candidate == item);
        self.assert_false(found, context, message)
    }

    /// No element appears twice. Stops scanning at the first duplicate.
    #[inline]
    pub fn assert_unique<I>(
        &self,
        items: I,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation>
    where
        I: IntoIterator,
        I::Item: Hash + Eq,
    {
        live_or_return!();
        let mut seen = HashSet::new();
        let duplicate = items.into_iter().any(|item| !seen.insert(item));
        self.assert_false(duplicate, context, message)
    }

    /// `min <= value <= max`.
    #[inline]
    pub fn assert_in_range<T: PartialOrd + ?Sized>(
        &self,
        value: &T,
        min: &T,
        max: &T,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_true(min <= value && value <= max, context, message)
    }

    #[inline]
    pub fn assert_empty<I: IntoIterator>(
        &self,
        items: I,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_true(items.into_iter().next().is_none(), context, message)
    }

    #[inline]
    pub fn assert_not_empty<I: IntoIterator>(
        &self,
        items: I,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_false(items.into_iter().next().is_none(), context, message)
    }

    #[inline]
    pub fn assert_len<I: IntoIterator>(
        &self,
        items: I,
        expected: usize,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_true(items.into_iter().count() == expected, context, message)
    }

    #[inline]
    pub fn assert_all<I, F>(
        &self,
        items: I,
        predicate: F,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> bool,
    {
        live_or_return!();
        self.assert_true(items.into_iter().all(predicate), context, message)
    }

    #[inline]
    pub fn assert_any<I, F>(
        &self,
        items: I,
        predicate: F,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> bool,
    {
        live_or_return!();
        self.assert_true(items.into_iter().any(predicate), context, message)
    }

    /// The string has at least one non-whitespace character.
    #[inline]
    pub fn assert_not_blank(
        &self,
        value: &str,
        context: &ContextRef,
        message: &str,
    ) -> Result<(), Violation> {
        live_or_return!();
        self.assert_false(value.trim().is_empty(), context, message)
    }
}
