//! Operator decisions at the gate.

use std::fmt;

use serde::Serialize;
use vigil_config::ConfigError;
use vigil_core::Violation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorDecision {
    /// Enter the running state despite the problem.
    Continue,
    Abort,
}

impl fmt::Display for OperatorDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Continue => "continue",
            Self::Abort => "abort",
        })
    }
}

/// Blocking choice presented to the operator when the gate cannot pass cleanly.
pub trait OperatorPrompt {
    /// Validation raised `violation`.
    fn on_violation(&self, violation: &Violation) -> OperatorDecision;

    /// Validation settings could not be loaded.
    fn on_missing_configuration(&self, error: &ConfigError) -> OperatorDecision;
}

/// Answers every prompt with the same decision. For headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub OperatorDecision);

impl OperatorPrompt for FixedDecision {
    fn on_violation(&self, _violation: &Violation) -> OperatorDecision {
        self.0
    }

    fn on_missing_configuration(&self, _error: &ConfigError) -> OperatorDecision {
        self.0
    }
}
