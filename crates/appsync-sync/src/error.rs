use appsync_storage::StorageError;

use crate::services::ServiceError;

/// Errors returned by sync operations.
///
/// Storage and service failures surface unchanged so callers can match on
/// the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("invalid application envelope: {message}")]
    InvalidEnvelope { message: String },
}

impl SyncError {
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            message: message.into(),
        }
    }

    /// The storage error behind this failure, if any.
    pub fn storage_error(&self) -> Option<&StorageError> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Service(ServiceError::Storage(err)) => Some(err),
            _ => None,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
