//! The signaled form of every invariant breach.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::identity::ContextRef;

/// An invariant breach: message, attribution, and an optional wrapped cause.
///
/// Violations are pass-scoped values. They are never silently dropped: every
/// producer either returns them to its caller or hands them to the log sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} [{context}]")]
pub struct Violation {
    message: String,
    context: ContextRef,
    #[source]
    cause: Option<Box<Violation>>,
}

impl Violation {
    pub fn new(message: impl Into<String>, context: ContextRef) -> Self {
        Self {
            message: message.into(),
            context,
            cause: None,
        }
    }

    /// Re-attribute this violation to the stored object at `path`.
    ///
    /// The message is carried over verbatim so the operator sees the original
    /// text; the sub-part attribution survives as the cause.
    #[must_use]
    pub fn at_asset(self, path: impl Into<String>) -> Self {
        Self {
            message: self.message.clone(),
            context: ContextRef::asset(path),
            cause: Some(Box::new(self)),
        }
    }

    /// Wrap this violation under a new message and context.
    #[must_use]
    pub fn wrap(self, message: impl Into<String>, context: ContextRef) -> Self {
        Self {
            message: message.into(),
            context,
            cause: Some(Box::new(self)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn context(&self) -> &ContextRef {
        &self.context
    }

    #[must_use]
    pub fn cause(&self) -> Option<&Self> {
        self.cause.as_deref()
    }

    /// The innermost violation in the chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(next) = current.cause() {
            current = next;
        }
        current
    }

    /// Iterate this violation followed by each wrapped cause.
    pub fn chain(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |v| v.cause())
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            message: &'a str,
            context: &'a ContextRef,
            #[serde(skip_serializing_if = "Option::is_none")]
            cause: Option<&'a Violation>,
        }

        Repr {
            message: &self.message,
            context: &self.context,
            cause: self.cause(),
        }
        .serialize(serializer)
    }
}
