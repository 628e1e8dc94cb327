//! The shape shared by every persisted record.
//!
//! A record is addressed by its table and primary key, and carries an
//! [`Index`] of field values the datastore can scope listings by (for
//! example every component whose `appPrimaryKey` is `my-app`).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::time::Timestamp;

/// Indexed field name -> value.
pub type Index = BTreeMap<String, String>;

/// Separator between the parts of a composite primary key.
pub const KEY_SEPARATOR: &str = "/";

/// Timestamps embedded in every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseModel {
    #[serde(default)]
    pub create_time: Timestamp,
    #[serde(default)]
    pub update_time: Timestamp,
}

/// A record that can be persisted in a datastore table.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Table the record lives in.
    const TABLE: &'static str;

    /// Natural identity of the record within its table.
    fn primary_key(&self) -> String;

    /// Indexed fields. Empty values are never indexed.
    fn index(&self) -> Index;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    fn create_time(&self) -> Timestamp {
        self.base().create_time
    }

    fn set_create_time(&mut self, time: Timestamp) {
        self.base_mut().create_time = time;
    }

    fn update_time(&self) -> Timestamp {
        self.base().update_time
    }

    fn set_update_time(&mut self, time: Timestamp) {
        self.base_mut().update_time = time;
    }

    /// Returns the primary key, rejecting keys with an empty component.
    fn validated_key(&self) -> Result<String> {
        let key = self.primary_key();
        if key.is_empty() || key.split(KEY_SEPARATOR).any(str::is_empty) {
            return Err(CoreError::empty_primary_key(Self::TABLE));
        }
        Ok(key)
    }
}

/// Joins the parts of a composite key.
pub fn compose_key(parts: &[&str]) -> String {
    parts.join(KEY_SEPARATOR)
}

/// Builds an index from field/value pairs, dropping empty values.
pub fn index_of(pairs: &[(&str, &str)]) -> Index {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| ((*field).to_string(), (*value).to_string()))
        .collect()
}
