use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

const VALID_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSyncConfig {
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppSyncConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sync.project_owner.trim().is_empty() {
            return Err(ConfigError::validation("sync.project_owner must not be empty"));
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        if !VALID_LEVELS.contains(&lvl.as_str()) {
            return Err(ConfigError::validation(format!(
                "logging.level must be one of {VALID_LEVELS:?}"
            )));
        }
        Ok(())
    }
}

/// Defaults applied to records created by sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Owner of projects created on behalf of a synced application.
    #[serde(default = "default_project_owner")]
    pub project_owner: String,
    #[serde(default = "default_project_description")]
    pub project_description: String,
}

fn default_project_owner() -> String {
    "admin".into()
}

fn default_project_description() -> String {
    "Automatically created by application sync".into()
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            project_owner: default_project_owner(),
            project_description: default_project_description(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
