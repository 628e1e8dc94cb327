use serde::{Deserialize, Serialize};

use crate::entity::{BaseModel, Entity, Index, compose_key, index_of};

/// A versioned snapshot of an application. Each version is its own record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRevision {
    #[serde(flatten)]
    pub base: BaseModel,
    pub app_primary_key: String,
    pub version: String,
    #[serde(default)]
    pub env_name: String,
    #[serde(default)]
    pub workflow_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub deploy_user: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub trigger_type: String,
    /// Rendered application configuration this revision applied.
    #[serde(default)]
    pub apply_app_config: String,
    #[serde(default)]
    pub revision_crd_name: String,
}

impl ApplicationRevision {
    pub fn new(app_primary_key: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            app_primary_key: app_primary_key.into(),
            version: version.into(),
            ..Default::default()
        }
    }
}

impl Entity for ApplicationRevision {
    const TABLE: &'static str = "application_revision";

    fn primary_key(&self) -> String {
        compose_key(&[&self.app_primary_key, &self.version])
    }

    fn index(&self) -> Index {
        index_of(&[
            ("appPrimaryKey", &self.app_primary_key),
            ("version", &self.version),
            ("envName", &self.env_name),
            ("status", &self.status),
        ])
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}
