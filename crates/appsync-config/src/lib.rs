//! Configuration for application sync.
//!
//! Settings are read from an optional TOML file and overridden by
//! `APPSYNC__*` environment variables, e.g. `APPSYNC__SYNC__PROJECT_OWNER=ops`.
//!
//! ```ignore
//! let cfg = appsync_config::loader::load_config(Some("appsync.toml"))?;
//! println!("default owner: {}", cfg.sync.project_owner);
//! ```

pub mod loader;
pub mod settings;

pub use settings::{AppSyncConfig, LoggingConfig, SyncSettings};

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config build error: {0}")]
    Build(#[source] config::ConfigError),

    #[error("config deserialize error: {0}")]
    Deserialize(#[source] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
