use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{BaseModel, Entity, Index, index_of};

/// Application metadata. The name is globally unique and doubles as the
/// owning key (`appPrimaryKey`) of every application-scoped entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Application {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Key that application-scoped entities reference.
    pub fn app_key(&self) -> &str {
        &self.name
    }
}

impl Entity for Application {
    const TABLE: &'static str = "application";

    fn primary_key(&self) -> String {
        self.name.clone()
    }

    fn index(&self) -> Index {
        index_of(&[("name", &self.name), ("project", &self.project)])
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}
