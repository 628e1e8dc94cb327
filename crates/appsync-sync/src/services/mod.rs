//! Higher-level creation services consulted by sync.
//!
//! These apply defaults and business checks before persisting a record.
//! Store-backed implementations live in the submodules; other deployments
//! may plug their own implementations into the [`Reconciler`](crate::Reconciler).

mod env;
mod project;
mod target;

use std::collections::BTreeMap;

use appsync_core::{ClusterTarget, Env, Project, Target};
use appsync_storage::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use env::StoreEnvService;
pub use project::StoreProjectService;
pub use target::StoreTargetService;

/// Errors reported by creation services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn already_exists(kind: &'static str, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub description: String,
}

impl CreateProjectRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnvRequest {
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
    /// Skip the check that no other env of the project binds these targets.
    #[serde(default)]
    pub allow_target_conflict: bool,
}

impl From<&Env> for CreateEnvRequest {
    fn from(env: &Env) -> Self {
        Self {
            name: env.name.clone(),
            alias: env.alias.clone(),
            description: env.description.clone(),
            project: env.project.clone(),
            namespace: env.namespace.clone(),
            targets: env.targets.clone(),
            allow_target_conflict: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetRequest {
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

impl From<&Target> for CreateTargetRequest {
    fn from(target: &Target) -> Self {
        Self {
            name: target.name.clone(),
            alias: target.alias.clone(),
            project: target.project.clone(),
            description: target.description.clone(),
            cluster: target.cluster.clone(),
            variable: target.variable.clone(),
        }
    }
}

#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, ServiceError>;
}

#[async_trait]
pub trait EnvService: Send + Sync {
    async fn create_env(&self, request: CreateEnvRequest) -> Result<Env, ServiceError>;
}

#[async_trait]
pub trait TargetService: Send + Sync {
    async fn create_target(&self, request: CreateTargetRequest) -> Result<Target, ServiceError>;
}

/// Rejects blank names and returns the alias, defaulting to the name.
fn alias_or_name(kind: &str, name: &str, alias: &str) -> Result<String, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::invalid_request(format!("{kind} name is required")));
    }
    Ok(if alias.is_empty() { name } else { alias }.to_string())
}
