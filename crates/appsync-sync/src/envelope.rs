//! Desired state of one application, fully materialized by the caller.

use appsync_core::{
    Application, ApplicationComponent, ApplicationPolicy, ApplicationRevision, Env, EnvBinding,
    Target, Workflow, WorkflowRecord,
};
use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};
use crate::services::CreateProjectRequest;

/// Everything sync writes for one application.
///
/// Optional members that are absent are skipped. Components, policies,
/// workflow, workflow record, revision and env binding must all belong to
/// `app_meta`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStoreApp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<CreateProjectRequest>,
    pub app_meta: Application,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Env>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_binding: Option<EnvBinding>,
    #[serde(default)]
    pub components: Vec<ApplicationComponent>,
    #[serde(default)]
    pub policies: Vec<ApplicationPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<Workflow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<WorkflowRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<ApplicationRevision>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl DataStoreApp {
    pub fn new(app_meta: Application) -> Self {
        Self {
            app_meta,
            ..Default::default()
        }
    }

    pub fn app_key(&self) -> &str {
        self.app_meta.app_key()
    }

    /// Checks that the envelope names an application and that every
    /// application-scoped member points at it.
    pub fn validate(&self) -> SyncResult<()> {
        let app = self.app_key();
        if app.trim().is_empty() {
            return Err(SyncError::invalid_envelope("application name is empty"));
        }

        let check = |kind: &str, name: &str, owner: &str| {
            if owner == app {
                Ok(())
            } else {
                Err(SyncError::invalid_envelope(format!(
                    "{kind} {name} belongs to application {owner:?}, expected {app:?}"
                )))
            }
        };

        if let Some(binding) = &self.env_binding {
            check("env binding", &binding.name, &binding.app_primary_key)?;
        }
        for comp in &self.components {
            check("component", &comp.name, &comp.app_primary_key)?;
        }
        for policy in &self.policies {
            check("policy", &policy.name, &policy.app_primary_key)?;
        }
        if let Some(workflow) = &self.workflow {
            check("workflow", &workflow.name, &workflow.app_primary_key)?;
        }
        if let Some(record) = &self.record {
            check("workflow record", &record.name, &record.app_primary_key)?;
        }
        if let Some(revision) = &self.revision {
            check("revision", &revision.version, &revision.app_primary_key)?;
        }
        Ok(())
    }
}
