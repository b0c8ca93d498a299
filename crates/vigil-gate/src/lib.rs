//! # vigil-gate
//!
//! The single checked transition from authoring into the running state.
//!
//! [`TransitionGate::request_start`] loads validation settings fresh, runs
//! the asset pipeline and then the scene monitor's activation pass, and asks
//! an [`OperatorPrompt`] what to do when either raises a violation. Choosing
//! [`OperatorDecision::Continue`] is the only way a violation can be demoted
//! to a log entry.

mod error;
mod gate;
mod prompt;

pub use error::GateError;
pub use gate::{GateState, TransitionGate, TransitionReport};
pub use prompt::{FixedDecision, OperatorDecision, OperatorPrompt};
