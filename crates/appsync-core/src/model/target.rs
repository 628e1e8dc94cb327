use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{BaseModel, Entity, Index, index_of};

/// Cluster connection of a deployment target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterTarget {
    pub cluster_name: String,
    #[serde(default)]
    pub namespace: String,
}

/// A deployment target (cluster + namespace), shared across applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterTarget>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variable: BTreeMap<String, Value>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for Target {
    const TABLE: &'static str = "target";

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
