//! Per-application reconciliation driver.

use std::sync::Arc;

use appsync_config::{AppSyncConfig, SyncSettings};
use appsync_storage::DynStore;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::collection::{sync_components, sync_policies};
use crate::envelope::DataStoreApp;
use crate::error::SyncResult;
use crate::observability;
use crate::record::{
    ProjectCreator, sync_app_meta, sync_env, sync_env_binding, sync_project, sync_revision,
    sync_targets, sync_workflow, sync_workflow_record,
};
use crate::report::{RecordOutcome, SyncReport};
use crate::services::{
    EnvService, ProjectService, StoreEnvService, StoreProjectService, StoreTargetService,
    TargetService,
};

/// Values applied to projects created on behalf of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncDefaults {
    pub project_owner: String,
    pub project_description: String,
}

impl Default for SyncDefaults {
    fn default() -> Self {
        Self::from(&SyncSettings::default())
    }
}

impl From<&SyncSettings> for SyncDefaults {
    fn from(settings: &SyncSettings) -> Self {
        Self {
            project_owner: settings.project_owner.clone(),
            project_description: settings.project_description.clone(),
        }
    }
}

/// Reconciles applications into a datastore.
///
/// Calls for the same application are serialized; different applications
/// run independently. A per-application lock lives only while a call for
/// that application is running or waiting.
pub struct Reconciler {
    store: DynStore,
    project_service: Option<Arc<dyn ProjectService>>,
    env_service: Arc<dyn EnvService>,
    target_service: Arc<dyn TargetService>,
    defaults: SyncDefaults,
    app_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Reconciler {
    pub fn builder(store: DynStore) -> ReconcilerBuilder {
        ReconcilerBuilder::new(store)
    }

    pub fn store(&self) -> &DynStore {
        &self.store
    }

    pub fn defaults(&self) -> &SyncDefaults {
        &self.defaults
    }

    /// Syncs every entity kind of `app` in dependency order: project, app
    /// metadata, env, env binding, components, policies, workflow, workflow
    /// record, revision, targets.
    ///
    /// The envelope is validated before anything is written. The first fatal
    /// error stops the run; kinds already synced stay written.
    #[instrument(skip_all, fields(app = %app.app_key()))]
    pub async fn sync_application(&self, app: DataStoreApp) -> SyncResult<SyncReport> {
        app.validate()?;
        let app_key = app.app_key().to_string();

        let lock = self.app_locks.entry(app_key.clone()).or_default().clone();
        let result = {
            let _guard = lock.lock().await;
            self.sync_locked(app_key.clone(), app).await
        };
        // Drop the entry unless another call for this app holds a clone.
        self.app_locks
            .remove_if(&app_key, |_, entry| Arc::strong_count(entry) == 2);
        result
    }

    /// Number of applications with a sync in flight or waiting.
    pub fn active_apps(&self) -> usize {
        self.app_locks.len()
    }

    async fn sync_locked(&self, app_key: String, app: DataStoreApp) -> SyncResult<SyncReport> {
        let store = self.store.as_ref();
        let DataStoreApp {
            project,
            app_meta,
            env,
            env_binding,
            components,
            policies,
            workflow,
            record,
            revision,
            targets,
        } = app;

        let project = match &project {
            Some(request) => {
                let creator = ProjectCreator::new(
                    self.project_service.as_deref(),
                    &self.defaults.project_owner,
                    &self.defaults.project_description,
                );
                sync_project(store, request, &creator).await?
            }
            None => RecordOutcome::Skipped,
        };
        let app_meta = sync_app_meta(store, app_meta).await?;
        let env = match env {
            Some(env) => sync_env(store, env, self.env_service.as_ref()).await?,
            None => RecordOutcome::Skipped,
        };
        let env_binding = match env_binding {
            Some(binding) => sync_env_binding(store, binding).await?,
            None => RecordOutcome::Skipped,
        };
        let components = sync_components(store, &app_key, components).await?;
        let policies = sync_policies(store, &app_key, policies).await?;
        let workflow = match workflow {
            Some(workflow) => sync_workflow(store, workflow).await?,
            None => RecordOutcome::Skipped,
        };
        let workflow_record = match record {
            Some(record) => sync_workflow_record(store, record).await?,
            None => RecordOutcome::Skipped,
        };
        let revision = match revision {
            Some(revision) => sync_revision(store, revision).await?,
            None => RecordOutcome::Skipped,
        };
        let targets = sync_targets(store, targets, self.target_service.as_ref()).await?;

        let report = SyncReport {
            app: app_key,
            project,
            app_meta,
            env,
            env_binding,
            components,
            policies,
            workflow,
            workflow_record,
            revision,
            targets,
        };

        info!(
            app = %report.app,
            writes = report.writes(),
            components_created = report.components.created.len(),
            components_deleted = report.components.deleted.len(),
            policies_created = report.policies.created.len(),
            policies_deleted = report.policies.deleted.len(),
            delete_failures = report.delete_failures().count(),
            "application synced"
        );

        Ok(report)
    }
}

/// Builder for [`Reconciler`]. Services default to the store-backed
/// implementations over the same store.
pub struct ReconcilerBuilder {
    store: DynStore,
    project_service: Option<Option<Arc<dyn ProjectService>>>,
    env_service: Option<Arc<dyn EnvService>>,
    target_service: Option<Arc<dyn TargetService>>,
    defaults: SyncDefaults,
}

impl ReconcilerBuilder {
    pub fn new(store: DynStore) -> Self {
        Self {
            store,
            project_service: None,
            env_service: None,
            target_service: None,
            defaults: SyncDefaults::default(),
        }
    }

    /// Builder for a process entry point: installs tracing at the
    /// configured level and takes project defaults from `config.sync`.
    pub fn from_config(store: DynStore, config: &AppSyncConfig) -> Self {
        if !observability::init_tracing(&config.logging) {
            debug!("tracing subscriber already installed");
        }
        Self::new(store).defaults(SyncDefaults::from(&config.sync))
    }

    pub fn project_service(mut self, service: Arc<dyn ProjectService>) -> Self {
        self.project_service = Some(Some(service));
        self
    }

    /// Disables project creation; missing projects are reported as skipped.
    pub fn without_project_service(mut self) -> Self {
        self.project_service = Some(None);
        self
    }

    pub fn env_service(mut self, service: Arc<dyn EnvService>) -> Self {
        self.env_service = Some(service);
        self
    }

    pub fn target_service(mut self, service: Arc<dyn TargetService>) -> Self {
        self.target_service = Some(service);
        self
    }

    pub fn defaults(mut self, defaults: SyncDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> Reconciler {
        let store = self.store;
        let project_service = self.project_service.unwrap_or_else(|| {
            Some(Arc::new(StoreProjectService::new(store.clone())) as Arc<dyn ProjectService>)
        });
        let env_service = self
            .env_service
            .unwrap_or_else(|| Arc::new(StoreEnvService::new(store.clone())));
        let target_service = self
            .target_service
            .unwrap_or_else(|| Arc::new(StoreTargetService::new(store.clone())));

        Reconciler {
            store,
            project_service,
            env_service,
            target_service,
            defaults: self.defaults,
            app_locks: DashMap::new(),
        }
    }
}
