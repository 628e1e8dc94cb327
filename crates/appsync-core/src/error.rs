use thiserror::Error;

/// Core error types for entity handling
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Empty primary key for {table} record")]
    EmptyPrimaryKey { table: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid ownership tag: {0}")]
    InvalidOwnership(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new EmptyPrimaryKey error
    pub fn empty_primary_key(table: impl Into<String>) -> Self {
        Self::EmptyPrimaryKey {
            table: table.into(),
        }
    }

    /// Create a new InvalidTimestamp error
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp(value.into())
    }

    /// Create a new InvalidOwnership error
    pub fn invalid_ownership(value: impl Into<String>) -> Self {
        Self::InvalidOwnership(value.into())
    }

    /// Check if this error was caused by malformed input rather than the system
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPrimaryKey { .. } | Self::InvalidTimestamp(_) | Self::InvalidOwnership(_)
        )
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
