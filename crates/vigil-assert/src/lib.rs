//! # vigil-assert
//!
//! The assertion facade: the single choke point through which every invariant
//! violation in Vigil is signaled.
//!
//! - [`Asserter`]: gated check primitives that all reduce to `assert_true` /
//!   `assert_false`, plus the one `fail` path
//! - [`LogSink`]: append-only record of every violation
//! - [`FeedbackOverlay`]: operator-facing message and failure panels
//! - [`Session`]: execution mode, gate phase, active scenes, and the latch the
//!   facade uses to suspend a pending transition
//!
//! ## Feature flags
//!
//! - `assertions` (default): primitives are live. Build with
//!   `--no-default-features` to compile them down to no-ops.

mod facade;
pub mod headless;
mod log_sink;
mod overlay;
mod session;

pub use facade::{Asserter, assertions_enabled};
pub use log_sink::{FileLogSink, LogEntry, LogSink, MemoryLogSink, Severity};
pub use overlay::FeedbackOverlay;
pub use session::{ExecutionMode, Phase, Session};
