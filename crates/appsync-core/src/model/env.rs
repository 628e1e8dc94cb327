use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::{BaseModel, Entity, Index, compose_key, index_of};

/// An environment: a namespace in a project bound to a set of targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Env {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

impl Env {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Target names as a set; order and duplicates are irrelevant.
    pub fn target_set(&self) -> BTreeSet<&str> {
        self.targets.iter().map(String::as_str).collect()
    }

    pub fn has_same_targets(&self, other: &Env) -> bool {
        self.target_set() == other.target_set()
    }
}

impl Entity for Env {
    const TABLE: &'static str = "env";

    fn primary_key(&self) -> String {
        self.name.clone()
    }

    fn index(&self) -> Index {
        index_of(&[
            ("name", &self.name),
            ("project", &self.project),
            ("namespace", &self.namespace),
        ])
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}

/// Links an application to the env it is deployed in. `name` is the env name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvBinding {
    #[serde(flatten)]
    pub base: BaseModel,
    pub app_primary_key: String,
    pub name: String,
}

impl EnvBinding {
    pub fn new(app_primary_key: impl Into<String>, env_name: impl Into<String>) -> Self {
        Self {
            app_primary_key: app_primary_key.into(),
            name: env_name.into(),
            ..Default::default()
        }
    }
}

impl Entity for EnvBinding {
    const TABLE: &'static str = "envbinding";

    fn primary_key(&self) -> String {
        compose_key(&[&self.app_primary_key, &self.name])
    }

    fn index(&self) -> Index {
        index_of(&[("appPrimaryKey", &self.app_primary_key), ("name", &self.name)])
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}
