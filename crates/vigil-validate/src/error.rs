//! Pipeline error types.

use thiserror::Error;
use vigil_core::{StoreError, Violation};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// An object failed validation. Attributed to the object's storage path.
    #[error(transparent)]
    Violation(#[from] Violation),

    /// The store query failed. Not a validation failure and never demotable.
    #[error(transparent)]
    Store(#[from] StoreError),
}
