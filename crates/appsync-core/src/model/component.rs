use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{BaseModel, Entity, Index, compose_key, index_of};
use crate::ownership::Ownership;

/// A trait attached to a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationTrait {
    #[serde(rename = "type")]
    pub trait_type: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// A component of an application, identified by (app key, name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationComponent {
    #[serde(flatten)]
    pub base: BaseModel,
    pub app_primary_key: String,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub component_type: String,
    /// Main components are rendered first in the application view.
    #[serde(default)]
    pub main: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<ApplicationTrait>,
    /// Free-text origin (user name, controller name).
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub ownership: Ownership,
}

impl ApplicationComponent {
    pub fn new(app_primary_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_primary_key: app_primary_key.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for ApplicationComponent {
    const TABLE: &'static str = "application_component";

    fn primary_key(&self) -> String {
        compose_key(&[&self.app_primary_key, &self.name])
    }

    fn index(&self) -> Index {
        index_of(&[
            ("appPrimaryKey", &self.app_primary_key),
            ("name", &self.name),
            ("type", &self.component_type),
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
