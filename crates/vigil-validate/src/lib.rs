//! # vigil-validate
//!
//! Runs user-supplied structural assertions over stored objects and live
//! scene entities.
//!
//! - [`ValidatorRegistry`]: maps a part's runtime type to its validation
//!   function. Types opt in once at startup, either with a closure or by
//!   implementing [`Assertable`].
//! - [`AssetValidationPipeline`]: discovers stored objects, validates each
//!   (whole trees for composites), and stops at the first failing object.
//! - [`SceneMonitor`]: validates live entities on scene activation and after
//!   structural edits, with an optional per-activation dedup window, and owns
//!   the built-in singleton checks.

mod error;
mod monitor;
mod pipeline;
mod registry;

pub use error::PipelineError;
pub use monitor::{MonitorReport, RunnerState, SceneMonitor};
pub use pipeline::{AssetValidationPipeline, PipelineReport};
pub use registry::{Assertable, ValidatorRegistry};
