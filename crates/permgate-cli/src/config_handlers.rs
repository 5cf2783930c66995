//! Handler functions for config CLI commands.

use std::path::{Path, PathBuf};

use permgate_core::{Error, PermgateConfig, Result};

use crate::cli::ConfigAction;

/// Permissions written by `config init`.
const STARTER_PERMISSIONS: [&str; 1] = [permgate_core::DEFAULT_PERMISSION];

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { file, force } => {
            let path = match file.or_else(|| config_path.map(str::to_string)) {
                Some(p) => PathBuf::from(p),
                None => PermgateConfig::default_config_path()
                    .ok_or_else(|| Error::config("Could not determine config directory"))?,
            };
            cmd_config_init(&path, force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = PermgateConfig::load(config_path)?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match PermgateConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!(
                    "(file does not exist, run `{} config init` to create it)",
                    PermgateConfig::project_name()
                );
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Create a starter configuration file at `path`.
pub fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let mut config = PermgateConfig::default();
    config.auth.defined_permissions = STARTER_PERMISSIONS.iter().map(|s| s.to_string()).collect();
    let toml_str = config.to_toml_string()?;
    std::fs::write(path, &toml_str).map_err(|e| Error::io_with_path(e, path))?;
    Ok(())
}
