//! Cross-cutting error types for Vigil host collaborators.
//!
//! Invariant breaches are not errors in this sense: they are carried by
//! [`Violation`](crate::Violation). The types here describe failures of the
//! host itself, which are never demotable.

use thiserror::Error;

/// Errors raised by an [`AssetStore`](crate::AssetStore) query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or refused the query.
    #[error("Asset store unavailable: {0}")]
    Unavailable(String),

    /// A configured search path is not understood by the store.
    #[error("Invalid search path '{path}': {reason}")]
    InvalidSearchPath { path: String, reason: String },
}
