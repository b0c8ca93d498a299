//! Asset validation settings.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn enabled() -> bool {
    true
}

/// Settings for one asset validation pass. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationSettings {
    /// Validate object trees (every descendant, not just the root).
    #[serde(default = "enabled")]
    pub validate_composites: bool,

    /// Validate standalone objects.
    #[serde(default = "enabled")]
    pub validate_leaves: bool,

    /// Ordered path prefixes to search. Empty searches the whole store.
    #[serde(default)]
    pub search_paths: Vec<String>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            validate_composites: true,
            validate_leaves: true,
            search_paths: Vec::new(),
        }
    }
}

impl ValidationSettings {
    pub const FILE_NAME: &'static str = "validation.toml";

    /// Load settings from `<project_root>/.vigil/validation.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when the file does not exist, or a
    /// figment/value error when it cannot be parsed.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(project_root);
        if !path.is_file() {
            return Err(ConfigError::Missing { path });
        }
        Self::figment(&path).extract::<Self>()?.normalized()
    }

    /// Build the provider chain for the settings file at `path`.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("VIGIL_VALIDATION_"))
    }

    #[must_use]
    pub fn path(project_root: &Path) -> PathBuf {
        crate::config_path(project_root, Self::FILE_NAME)
    }

    /// Write default settings, leaving an existing file untouched.
    ///
    /// Returns the path and whether a file was created.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error if the file cannot be written.
    pub fn write_default(project_root: &Path) -> Result<(PathBuf, bool), ConfigError> {
        let path = Self::path(project_root);
        if path.exists() {
            return Ok((path, false));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(&Self::default())?)?;
        Ok((path, true))
    }

    /// Whether a pass with these settings would look at any object at all.
    #[must_use]
    pub const fn validates_anything(&self) -> bool {
        self.validate_composites || self.validate_leaves
    }

    /// Trim trailing separators and drop repeated prefixes, keeping the first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a blank search path.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        let mut seen = Vec::with_capacity(self.search_paths.len());
        for raw in self.search_paths {
            let path = raw.trim().trim_end_matches('/').to_string();
            if path.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "search_paths".to_string(),
                    reason: format!("blank search path '{raw}'"),
                });
            }
            if !seen.contains(&path) {
                seen.push(path);
            }
        }
        self.search_paths = seen;
        Ok(self)
    }
}

/// Something that can produce fresh settings at the start of a gate pass.
pub trait SettingsSource {
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when no settings exist.
    fn load_settings(&self) -> Result<ValidationSettings, ConfigError>;
}

/// Settings read from a project directory on every call.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    root: PathBuf,
}

impl ProjectSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SettingsSource for ProjectSettings {
    fn load_settings(&self) -> Result<ValidationSettings, ConfigError> {
        ValidationSettings::load(&self.root)
    }
}

impl SettingsSource for ValidationSettings {
    fn load_settings(&self) -> Result<ValidationSettings, ConfigError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_validate_everything() {
        let settings = ValidationSettings::default();
        assert!(settings.validate_composites);
        assert!(settings.validate_leaves);
        assert!(settings.search_paths.is_empty());
        assert!(settings.validates_anything());
    }

    #[test]
    fn normalized_dedupes_in_order() {
        let settings = ValidationSettings {
            search_paths: vec![
                "configs/".to_string(),
                "prefabs".to_string(),
                "configs".to_string(),
            ],
            ..ValidationSettings::default()
        }
        .normalized()
        .expect("valid paths");
        assert_eq!(settings.search_paths, vec!["configs", "prefabs"]);
    }

    #[test]
    fn blank_search_path_is_rejected() {
        let err = ValidationSettings {
            search_paths: vec!["  ".to_string()],
            ..ValidationSettings::default()
        }
        .normalized()
        .expect_err("blank path");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "search_paths"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ValidationSettings::load(dir.path()).expect_err("no settings file");
        assert!(matches!(err, ConfigError::Missing { .. }));
    }
}
