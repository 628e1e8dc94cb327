use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{BaseModel, Entity, Index, compose_key, index_of};
use crate::ownership::Ownership;

/// A policy of an application, identified by (app key, name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPolicy {
    #[serde(flatten)]
    pub base: BaseModel,
    pub app_primary_key: String,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub policy_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(default)]
    pub env_name: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub ownership: Ownership,
    /// Referenced from elsewhere (e.g. a workflow step) rather than owned by
    /// this application. Reference policies are never removed by sync.
    #[serde(default)]
    pub reference: bool,
}

impl ApplicationPolicy {
    pub fn new(app_primary_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_primary_key: app_primary_key.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for ApplicationPolicy {
    const TABLE: &'static str = "application_policy";

    fn primary_key(&self) -> String {
        compose_key(&[&self.app_primary_key, &self.name])
    }

    fn index(&self) -> Index {
        index_of(&[
            ("appPrimaryKey", &self.app_primary_key),
            ("name", &self.name),
            ("type", &self.policy_type),
            ("ownership", self.ownership.as_str()),
        ])
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}
