//! Scene monitor configuration.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use vigil_core::SceneRole;

use crate::error::ConfigError;

const fn enabled() -> bool {
    true
}

/// Independently toggleable whole-scene singleton checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuiltinChecks {
    #[serde(default)]
    pub primary_viewpoint: bool,
    #[serde(default)]
    pub audio_sink: bool,
    #[serde(default)]
    pub input_dispatch: bool,
    #[serde(default)]
    pub directional_light: bool,
}

impl BuiltinChecks {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            primary_viewpoint: true,
            audio_sink: true,
            input_dispatch: true,
            directional_light: true,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self, role: SceneRole) -> bool {
        match role {
            SceneRole::PrimaryViewpoint => self.primary_viewpoint,
            SceneRole::AudioSink => self.audio_sink,
            SceneRole::InputDispatch => self.input_dispatch,
            SceneRole::DirectionalLight => self.directional_light,
        }
    }

    /// Roles whose check is switched on, in a fixed order.
    pub fn enabled_roles(self) -> impl Iterator<Item = SceneRole> {
        SceneRole::ALL
            .into_iter()
            .filter(move |role| self.is_enabled(*role))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Re-validate entities already validated during this scene activation.
    #[serde(default = "enabled")]
    pub allow_repeated_validation: bool,

    /// Re-run the scene pass after structural edits in authoring mode.
    #[serde(default = "enabled")]
    pub rerun_on_structural_change: bool,

    #[serde(default)]
    pub builtins: BuiltinChecks,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            allow_repeated_validation: true,
            rerun_on_structural_change: true,
            builtins: BuiltinChecks::default(),
        }
    }
}

impl MonitorConfig {
    pub const FILE_NAME: &'static str = "monitor.toml";

    /// Load from defaults, `.vigil/monitor.toml` (if present), and env.
    ///
    /// # Errors
    ///
    /// Returns a figment error when the file or env values do not parse.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment(project_root).extract().map_err(ConfigError::from)
    }

    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let path = crate::config_path(project_root, Self::FILE_NAME);
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("VIGIL_MONITOR_").split("__"))
    }
}
