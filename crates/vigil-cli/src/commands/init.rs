use std::path::Path;

use serde::Serialize;
use vigil_config::ValidationSettings;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    path: String,
    created: bool,
}

/// Handle `vigil init`. Existing settings are left as they are.
pub fn handle(project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (path, created) = ValidationSettings::write_default(project_root)?;
    if created {
        tracing::info!(path = %path.display(), "wrote default validation settings");
    }
    output(
        &InitResponse {
            path: path.display().to_string(),
            created,
        },
        flags.format,
    )
}
