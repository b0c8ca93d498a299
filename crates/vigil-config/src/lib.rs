//! # vigil-config
//!
//! Configuration loading for Vigil using figment.
//!
//! Two independent documents live under the project's `.vigil/` directory:
//!
//! 1. `.vigil/validation.toml` -> [`ValidationSettings`]. Required: absence at
//!    gate time is a misconfiguration, never a silent default. Fields can be
//!    overridden by `VIGIL_VALIDATION_*` environment variables.
//! 2. `.vigil/monitor.toml` -> [`MonitorConfig`]. Optional, layered over
//!    built-in defaults and `VIGIL_MONITOR_*` environment variables (`__`
//!    separates nested sections, e.g. `VIGIL_MONITOR_BUILTINS__AUDIO_SINK`).
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use vigil_config::{SettingsSource, ProjectSettings};
//!
//! let source = ProjectSettings::new(Path::new("."));
//! let settings = source.load_settings().expect("settings");
//! if !settings.validates_anything() {
//!     println!("asset validation disabled");
//! }
//! ```

mod error;
mod monitor;
mod validation;

pub use error::ConfigError;
pub use monitor::{BuiltinChecks, MonitorConfig};
pub use validation::{ProjectSettings, SettingsSource, ValidationSettings};

use std::path::{Path, PathBuf};

/// Directory holding Vigil's per-project files.
pub const CONFIG_DIR: &str = ".vigil";

/// Path of a file inside the project's `.vigil/` directory.
#[must_use]
pub fn config_path(project_root: &Path, file: &str) -> PathBuf {
    project_root.join(CONFIG_DIR).join(file)
}
