//! Gate error types.

use thiserror::Error;
use vigil_config::ConfigError;
use vigil_core::{StoreError, Violation};

#[derive(Debug, Error)]
pub enum GateError {
    /// The operator aborted after a violation. The gate stays idle.
    #[error(transparent)]
    Violation(Violation),

    /// Settings could not be loaded and the operator chose not to proceed.
    #[error("validation settings unavailable: {0}")]
    ConfigurationMissing(#[source] ConfigError),

    #[error(transparent)]
    StoreUnavailable(StoreError),

    #[error("gate is already running")]
    AlreadyRunning,
}

impl GateError {
    /// The violation that blocked the transition, if any.
    #[must_use]
    pub const fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Violation(violation) => Some(violation),
            _ => None,
        }
    }
}
