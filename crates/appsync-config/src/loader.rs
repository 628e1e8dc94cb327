use std::path::{Path, PathBuf};

use config::{Config, Environment, File};

use crate::{AppSyncConfig, ConfigError, Result};

/// File read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "appsync.toml";

/// Loads configuration from `path` (or [`DEFAULT_CONFIG_FILE`]) and
/// `APPSYNC__*` environment variables, then validates it.
///
/// A missing file is not an error; defaults apply.
pub fn load_config(path: Option<&str>) -> Result<AppSyncConfig> {
    let mut builder = Config::builder();
    let file = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
    if file.exists() {
        builder = builder.add_source(File::from(file));
    } else if path.is_some() {
        tracing::warn!(path = %file.display(), "config file not found, using defaults");
    }
    // Environment variable overrides, e.g., APPSYNC__LOGGING__LEVEL=debug
    builder = builder.add_source(
        Environment::with_prefix("APPSYNC")
            .try_parsing(true)
            .separator("__"),
    );
    let cfg = builder.build().map_err(ConfigError::Build)?;
    let merged: AppSyncConfig = cfg.try_deserialize().map_err(ConfigError::Deserialize)?;
    merged.validate()?;
    Ok(merged)
}

pub fn load_config_with_default_path<P: AsRef<Path>>(path: Option<P>) -> Result<AppSyncConfig> {
    let p = path
        .as_ref()
        .map(|p| p.as_ref().to_string_lossy().to_string());
    load_config(p.as_deref())
}
