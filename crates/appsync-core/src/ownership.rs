//! Ownership tag carried by collection members (components and policies).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Who owns the lifecycle of a collection member.
///
/// Only [`Ownership::SyncManaged`] members may be deleted by sync when they
/// disappear from the desired state. Anything created by a user or another
/// system is [`Ownership::ExternallyOwned`] and is left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ownership {
    /// Generated by the sync process from the declarative resource.
    SyncManaged,
    /// Created by a user or another system.
    #[default]
    ExternallyOwned,
}

impl Ownership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::SyncManaged => "syncManaged",
            Ownership::ExternallyOwned => "externallyOwned",
        }
    }

    pub fn is_sync_managed(&self) -> bool {
        matches!(self, Ownership::SyncManaged)
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ownership {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "syncManaged" => Ok(Ownership::SyncManaged),
            "externallyOwned" => Ok(Ownership::ExternallyOwned),
            other => Err(CoreError::invalid_ownership(other)),
        }
    }
}
