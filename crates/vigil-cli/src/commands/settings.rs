use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use vigil_config::{MonitorConfig, ValidationSettings};

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SettingsResponse {
    validation: ValidationSettings,
    monitor: MonitorConfig,
    assertions_enabled: bool,
}

/// Handle `vigil settings`.
pub fn handle(project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let validation = ValidationSettings::load(project_root)
        .context("failed to load validation settings (run 'vigil init' to create them)")?;
    let monitor =
        MonitorConfig::load(project_root).context("failed to load monitor configuration")?;
    output(
        &SettingsResponse {
            validation,
            monitor,
            assertions_enabled: vigil_assert::assertions_enabled(),
        },
        flags.format,
    )
}
