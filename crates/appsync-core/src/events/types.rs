use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, now_utc};

/// Type of record change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOperation {
    Created,
    Updated,
    Deleted,
}

impl RecordOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOperation::Created => "created",
            RecordOperation::Updated => "updated",
            RecordOperation::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for RecordOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A successful mutation of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEvent {
    pub operation: RecordOperation,
    pub table: String,
    pub key: String,
    pub timestamp: Timestamp,
}

impl RecordEvent {
    pub fn new(
        operation: RecordOperation,
        table: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            table: table.into(),
            key: key.into(),
            timestamp: now_utc(),
        }
    }

    pub fn created(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(RecordOperation::Created, table, key)
    }

    pub fn updated(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(RecordOperation::Updated, table, key)
    }

    pub fn deleted(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(RecordOperation::Deleted, table, key)
    }

    /// Check if this event concerns the given table (no filter matches all).
    pub fn matches_table(&self, table: Option<&str>) -> bool {
        match table {
            Some(t) => self.table == t,
            None => true,
        }
    }
}
