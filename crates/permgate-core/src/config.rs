//! Configuration: the defined-permission vocabulary.
//!
//! ```toml
//! [auth]
//! defined_permissions = ["use-app", "edit-post", "delete-post"]
//! ```
//!
//! Resolution order for the file: explicit path, then `PERMGATE_CONFIG`, then
//! `<config dir>/permgate/config.toml`. `PERMGATE_DEFINED_PERMISSIONS`
//! (comma-separated) replaces the list from the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vocabulary::Vocabulary;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PERMGATE_CONFIG";

/// Environment variable overriding `auth.defined_permissions`.
pub const DEFINED_PERMISSIONS_ENV: &str = "PERMGATE_DEFINED_PERMISSIONS";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermgateConfig {
    /// Authorization settings.
    pub auth: AuthSection,
}

/// The `[auth]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// Every permission name an ability expression may use.
    pub defined_permissions: Vec<String>,
}

impl PermgateConfig {
    /// Project name used for the config directory.
    pub fn project_name() -> &'static str {
        "permgate"
    }

    /// `<config dir>/permgate/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// The file `load` would read for `config_path`.
    pub fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
        config_path
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Load configuration, applying the environment override.
    ///
    /// A file named explicitly (argument or `PERMGATE_CONFIG`) must exist; a
    /// missing file at the default location yields an empty vocabulary.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let named = config_path
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match named {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    log::warn!(
                        "No config file at {}; no permissions are defined",
                        path.display()
                    );
                    Self::default()
                }
                None => {
                    log::warn!("Could not determine config directory; no permissions are defined");
                    Self::default()
                }
            },
        };

        config.apply_defined_permissions_override(
            std::env::var(DEFINED_PERMISSIONS_ENV).ok().as_deref(),
        );
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("Loaded config from {}", path.display());
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Replace the defined permissions with a comma-separated list, if given.
    pub fn apply_defined_permissions_override(&mut self, list: Option<&str>) {
        if let Some(list) = list {
            self.auth.defined_permissions = list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            log::debug!(
                "{DEFINED_PERMISSIONS_ENV} overrides defined permissions ({} names)",
                self.auth.defined_permissions.len()
            );
        }
    }

    /// Build the validated vocabulary.
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::new(self.auth.defined_permissions.iter().cloned())
    }
}
