use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{BaseModel, Entity, Index, compose_key, index_of};
use crate::time::Timestamp;

/// One step of a workflow definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// The deployment workflow of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(flatten)]
    pub base: BaseModel,
    pub app_primary_key: String,
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub env_name: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn new(app_primary_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_primary_key: app_primary_key.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for Workflow {
    const TABLE: &'static str = "workflow";

    fn primary_key(&self) -> String {
        compose_key(&[&self.app_primary_key, &self.name])
    }

    fn index(&self) -> Index {
        index_of(&[
            ("appPrimaryKey", &self.app_primary_key),
            ("name", &self.name),
            ("envName", &self.env_name),
        ])
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}

/// Execution status of a single workflow step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStepStatus {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub step_type: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub message: String,
}

/// Historical record of one workflow execution. Never rewritten once stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    #[serde(flatten)]
    pub base: BaseModel,
    pub app_primary_key: String,
    pub name: String,
    #[serde(default)]
    pub workflow_name: String,
    #[serde(default)]
    pub workflow_alias: String,
    #[serde(default)]
    pub revision_primary_key: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub start_time: Timestamp,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStepStatus>,
}

impl WorkflowRecord {
    pub fn new(app_primary_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_primary_key: app_primary_key.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Entity for WorkflowRecord {
    const TABLE: &'static str = "workflow_record";

    fn primary_key(&self) -> String {
        compose_key(&[&self.app_primary_key, &self.name])
    }

    fn index(&self) -> Index {
        index_of(&[
            ("appPrimaryKey", &self.app_primary_key),
            ("name", &self.name),
            ("workflowName", &self.workflow_name),
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
