//! Single-record sync.
//!
//! Every singleton kind goes through [`sync_record`]; the kind's
//! [`SyncStrategy`] decides whether an existing record is overwritten,
//! left alone, or looked up by identity before an append. Creation is
//! delegated to a [`RecordCreator`] so kinds can route inserts through a
//! higher-level service.

use appsync_core::{
    Application, ApplicationRevision, Entity, Env, EnvBinding, Index, Project, Target, Workflow,
    WorkflowRecord, index_of,
};
use appsync_storage::{DataStore, EntityStore, StorageError};
use async_trait::async_trait;
use tracing::debug;

use crate::error::SyncResult;
use crate::report::RecordOutcome;
use crate::services::{
    CreateEnvRequest, CreateProjectRequest, CreateTargetRequest, EnvService, ProjectService,
    ServiceError, TargetService,
};

/// How an existing record of a kind is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Overwrite the stored record, keeping its create time.
    Upsert,
    /// Never overwrite; skip if any record with the same identity exists.
    AppendOnly,
    /// Create if missing, otherwise leave the stored record untouched.
    CreateOnly,
}

/// A singleton kind reconciled by [`sync_record`].
pub trait SyncedRecord: Entity {
    const KIND: &'static str;
    const STRATEGY: SyncStrategy;

    /// Returns true when `stored` already matches `self` closely enough that
    /// an upsert can skip the write.
    fn converged(&self, _stored: &Self) -> bool {
        false
    }

    /// Index scope identifying this record, used by append-only lookups.
    fn identity_scope(&self) -> Index {
        self.index()
    }
}

/// Inserts a record that does not exist yet.
#[async_trait]
pub trait RecordCreator<T: SyncedRecord>: Send + Sync {
    async fn create(&self, record: T) -> SyncResult<RecordOutcome>;
}

/// Creates records with a plain datastore insert.
pub struct StoreInsert<'a> {
    store: &'a dyn DataStore,
}

impl<'a> StoreInsert<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<T: SyncedRecord> RecordCreator<T> for StoreInsert<'_> {
    async fn create(&self, mut record: T) -> SyncResult<RecordOutcome> {
        self.store.add_entity(&mut record).await?;
        Ok(RecordOutcome::Created)
    }
}

/// Brings the stored version of one record in line with `desired`.
///
/// A lookup error other than not-found is returned unchanged and nothing is
/// written.
pub async fn sync_record<T, C>(
    store: &dyn DataStore,
    mut desired: T,
    creator: &C,
) -> SyncResult<RecordOutcome>
where
    T: SyncedRecord,
    C: RecordCreator<T> + ?Sized,
{
    let key = desired.primary_key();

    if T::STRATEGY == SyncStrategy::AppendOnly {
        // An empty identity part would widen the scope to unrelated records.
        desired.validated_key().map_err(StorageError::from)?;
        let existing = store.list(T::TABLE, &desired.identity_scope(), None).await?;
        if !existing.is_empty() {
            debug!(kind = T::KIND, key = %key, "record already appended");
            return Ok(RecordOutcome::Unchanged);
        }
        let outcome = creator.create(desired).await?;
        debug!(kind = T::KIND, key = %key, outcome = %outcome, "record appended");
        return Ok(outcome);
    }

    match store.get_entity(&desired).await {
        Ok(stored) => {
            if T::STRATEGY == SyncStrategy::CreateOnly || desired.converged(&stored) {
                debug!(kind = T::KIND, key = %key, "record unchanged");
                return Ok(RecordOutcome::Unchanged);
            }
            desired.set_create_time(stored.create_time());
            store.put_entity(&mut desired).await?;
            debug!(kind = T::KIND, key = %key, "record updated");
            Ok(RecordOutcome::Updated)
        }
        Err(err) if err.is_not_found() => {
            let outcome = creator.create(desired).await?;
            debug!(kind = T::KIND, key = %key, outcome = %outcome, "record created");
            Ok(outcome)
        }
        Err(err) => Err(err.into()),
    }
}

/// Maps a service "already exists" answer to a successful outcome.
fn tolerate_existing<R>(result: Result<R, ServiceError>) -> SyncResult<RecordOutcome> {
    match result {
        Ok(_) => Ok(RecordOutcome::Created),
        Err(err) if err.is_already_exists() => Ok(RecordOutcome::AlreadyExists),
        Err(err) => Err(err.into()),
    }
}

/// Creates projects through a [`ProjectService`] with fixed owner and
/// description. Without a service, project creation is skipped.
pub struct ProjectCreator<'a> {
    service: Option<&'a dyn ProjectService>,
    owner: &'a str,
    description: &'a str,
}

impl<'a> ProjectCreator<'a> {
    pub fn new(service: Option<&'a dyn ProjectService>, owner: &'a str, description: &'a str) -> Self {
        Self {
            service,
            owner,
            description,
        }
    }
}

#[async_trait]
impl RecordCreator<Project> for ProjectCreator<'_> {
    async fn create(&self, record: Project) -> SyncResult<RecordOutcome> {
        let Some(service) = self.service else {
            return Ok(RecordOutcome::Skipped);
        };
        let request = CreateProjectRequest {
            name: record.name,
            alias: record.alias,
            owner: self.owner.to_string(),
            description: self.description.to_string(),
        };
        tolerate_existing(service.create_project(request).await)
    }
}

/// Creates envs through an [`EnvService`], always allowing target overlap
/// with other envs.
pub struct EnvCreator<'a> {
    service: &'a dyn EnvService,
}

impl<'a> EnvCreator<'a> {
    pub fn new(service: &'a dyn EnvService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RecordCreator<Env> for EnvCreator<'_> {
    async fn create(&self, record: Env) -> SyncResult<RecordOutcome> {
        let request = CreateEnvRequest {
            allow_target_conflict: true,
            ..CreateEnvRequest::from(&record)
        };
        tolerate_existing(self.service.create_env(request).await)
    }
}

pub struct TargetCreator<'a> {
    service: &'a dyn TargetService,
}

impl<'a> TargetCreator<'a> {
    pub fn new(service: &'a dyn TargetService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RecordCreator<Target> for TargetCreator<'_> {
    async fn create(&self, record: Target) -> SyncResult<RecordOutcome> {
        tolerate_existing(self.service.create_target(CreateTargetRequest::from(&record)).await)
    }
}

impl SyncedRecord for Project {
    const KIND: &'static str = "project";
    const STRATEGY: SyncStrategy = SyncStrategy::CreateOnly;
}

impl SyncedRecord for Application {
    const KIND: &'static str = "application";
    const STRATEGY: SyncStrategy = SyncStrategy::Upsert;
}

impl SyncedRecord for Env {
    const KIND: &'static str = "env";
    const STRATEGY: SyncStrategy = SyncStrategy::Upsert;

    fn converged(&self, stored: &Self) -> bool {
        self.has_same_targets(stored)
    }
}

impl SyncedRecord for EnvBinding {
    const KIND: &'static str = "envbinding";
    const STRATEGY: SyncStrategy = SyncStrategy::Upsert;
}

impl SyncedRecord for Workflow {
    const KIND: &'static str = "workflow";
    const STRATEGY: SyncStrategy = SyncStrategy::Upsert;
}

impl SyncedRecord for WorkflowRecord {
    const KIND: &'static str = "workflow_record";
    const STRATEGY: SyncStrategy = SyncStrategy::AppendOnly;

    fn identity_scope(&self) -> Index {
        index_of(&[("appPrimaryKey", &self.app_primary_key), ("name", &self.name)])
    }
}

impl SyncedRecord for ApplicationRevision {
    const KIND: &'static str = "application_revision";
    const STRATEGY: SyncStrategy = SyncStrategy::AppendOnly;

    fn identity_scope(&self) -> Index {
        index_of(&[
            ("appPrimaryKey", &self.app_primary_key),
            ("version", &self.version),
        ])
    }
}

impl SyncedRecord for Target {
    const KIND: &'static str = "target";
    const STRATEGY: SyncStrategy = SyncStrategy::CreateOnly;
}

/// Creates the project when missing. An existing project is never updated.
pub async fn sync_project(
    store: &dyn DataStore,
    request: &CreateProjectRequest,
    creator: &ProjectCreator<'_>,
) -> SyncResult<RecordOutcome> {
    let project = Project {
        name: request.name.clone(),
        alias: request.alias.clone(),
        owner: request.owner.clone(),
        description: request.description.clone(),
        ..Default::default()
    };
    sync_record(store, project, creator).await
}

pub async fn sync_app_meta(store: &dyn DataStore, app: Application) -> SyncResult<RecordOutcome> {
    sync_record(store, app, &StoreInsert::new(store)).await
}

/// Upserts the env, skipping the write when its target set is unchanged.
pub async fn sync_env(
    store: &dyn DataStore,
    env: Env,
    service: &dyn EnvService,
) -> SyncResult<RecordOutcome> {
    sync_record(store, env, &EnvCreator::new(service)).await
}

pub async fn sync_env_binding(
    store: &dyn DataStore,
    binding: EnvBinding,
) -> SyncResult<RecordOutcome> {
    sync_record(store, binding, &StoreInsert::new(store)).await
}

pub async fn sync_workflow(store: &dyn DataStore, workflow: Workflow) -> SyncResult<RecordOutcome> {
    sync_record(store, workflow, &StoreInsert::new(store)).await
}

pub async fn sync_workflow_record(
    store: &dyn DataStore,
    record: WorkflowRecord,
) -> SyncResult<RecordOutcome> {
    sync_record(store, record, &StoreInsert::new(store)).await
}

pub async fn sync_revision(
    store: &dyn DataStore,
    revision: ApplicationRevision,
) -> SyncResult<RecordOutcome> {
    sync_record(store, revision, &StoreInsert::new(store)).await
}

/// Creates missing targets one by one. Existing targets are never updated or
/// deleted; the first failure aborts the remaining targets.
pub async fn sync_targets(
    store: &dyn DataStore,
    targets: Vec<Target>,
    service: &dyn TargetService,
) -> SyncResult<Vec<(String, RecordOutcome)>> {
    let creator = TargetCreator::new(service);
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
        let name = target.name.clone();
        let outcome = sync_record(store, target, &creator).await?;
        outcomes.push((name, outcome));
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use appsync_core::Timestamp;
    use appsync_db_memory::InMemoryStore;
    use std::sync::Mutex;

    /// Records the project requests it receives.
    #[derive(Default)]
    struct RecordingProjects {
        requests: Mutex<Vec<CreateProjectRequest>>,
        already_exists: bool,
    }

    #[async_trait]
    impl ProjectService for RecordingProjects {
        async fn create_project(
            &self,
            request: CreateProjectRequest,
        ) -> Result<Project, ServiceError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.already_exists {
                return Err(ServiceError::already_exists("project", request.name));
            }
            Ok(Project::new(request.name))
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates_keeping_create_time() {
        let store = InMemoryStore::new();
        let mut app = Application::new("demo");
        app.description = "v1".into();

        assert_eq!(sync_app_meta(&store, app.clone()).await.unwrap(), RecordOutcome::Created);
        let first = store.get_entity(&app).await.unwrap();

        app.description = "v2".into();
        assert_eq!(sync_app_meta(&store, app.clone()).await.unwrap(), RecordOutcome::Updated);
        let second = store.get_entity(&app).await.unwrap();

        assert_eq!(second.description, "v2");
        assert_eq!(second.create_time(), first.create_time());
        assert!(second.update_time() >= first.update_time());
    }

    #[tokio::test]
    async fn test_upsert_ignores_create_time_in_desired() {
        let store = InMemoryStore::new();
        let binding = EnvBinding::new("demo", "prod");
        sync_env_binding(&store, binding.clone()).await.unwrap();
        let created = store.get_entity(&binding).await.unwrap().create_time();

        let mut again = binding.clone();
        again.set_create_time(Timestamp::UNSET);
        sync_env_binding(&store, again).await.unwrap();
        assert_eq!(store.get_entity(&binding).await.unwrap().create_time(), created);
    }

    #[tokio::test]
    async fn test_append_only_never_overwrites() {
        let store = InMemoryStore::new();
        let mut record = WorkflowRecord::new("demo", "rec-1");
        record.status = "running".into();
        assert_eq!(
            sync_workflow_record(&store, record.clone()).await.unwrap(),
            RecordOutcome::Created
        );

        record.status = "succeeded".into();
        assert_eq!(
            sync_workflow_record(&store, record.clone()).await.unwrap(),
            RecordOutcome::Unchanged
        );
        assert_eq!(store.get_entity(&record).await.unwrap().status, "running");
    }

    /// Target service answering every request with a fixed error.
    struct RefusingTargets {
        requests: Mutex<Vec<String>>,
        conflict: bool,
    }

    impl RefusingTargets {
        fn new(conflict: bool) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                conflict,
            }
        }
    }

    #[async_trait]
    impl TargetService for RefusingTargets {
        async fn create_target(
            &self,
            request: CreateTargetRequest,
        ) -> Result<Target, ServiceError> {
            self.requests.lock().unwrap().push(request.name.clone());
            if self.conflict {
                return Err(ServiceError::conflict(format!("cluster of {} is taken", request.name)));
            }
            Err(ServiceError::already_exists("target", request.name))
        }
    }

    #[tokio::test]
    async fn test_append_only_rejects_empty_identity() {
        let store = InMemoryStore::new();
        store
            .add_entity(&mut WorkflowRecord::new("demo", "rec-1"))
            .await
            .unwrap();

        let err = sync_workflow_record(&store, WorkflowRecord::new("demo", ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err.storage_error(),
            Some(StorageError::InvalidRecord { .. })
        ));

        let err = sync_revision(&store, ApplicationRevision::new("demo", ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err.storage_error(),
            Some(StorageError::InvalidRecord { .. })
        ));
    }

    #[tokio::test]
    async fn test_target_already_exists_is_tolerated() {
        let store = InMemoryStore::new();
        let service = RefusingTargets::new(false);

        let outcomes = sync_targets(
            &store,
            vec![Target::new("local"), Target::new("remote")],
            &service,
        )
        .await
        .unwrap();

        assert_eq!(
            outcomes,
            vec![
                ("local".to_string(), RecordOutcome::AlreadyExists),
                ("remote".to_string(), RecordOutcome::AlreadyExists),
            ]
        );
        assert_eq!(*service.requests.lock().unwrap(), vec!["local", "remote"]);
    }

    #[tokio::test]
    async fn test_target_service_failure_stops_remaining_targets() {
        let store = InMemoryStore::new();
        let service = RefusingTargets::new(true);

        let err = sync_targets(
            &store,
            vec![Target::new("local"), Target::new("remote")],
            &service,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SyncError::Service(ServiceError::Conflict { .. })
        ));
        assert_eq!(*service.requests.lock().unwrap(), vec!["local"]);
    }

    #[tokio::test]
    async fn test_revisions_append_per_version() {
        let store = InMemoryStore::new();
        sync_revision(&store, ApplicationRevision::new("demo", "v1")).await.unwrap();
        sync_revision(&store, ApplicationRevision::new("demo", "v2")).await.unwrap();
        sync_revision(&store, ApplicationRevision::new("demo", "v1")).await.unwrap();

        let scope = index_of(&[("appPrimaryKey", "demo")]);
        let revisions: Vec<ApplicationRevision> = store.list_entities(&scope, None).await.unwrap();
        assert_eq!(revisions.len(), 2);
    }

    #[tokio::test]
    async fn test_env_skips_write_when_targets_match() {
        let store = InMemoryStore::new();
        let service = crate::services::StoreEnvService::new(std::sync::Arc::new(store.clone()));
        let mut env = Env::new("prod");
        env.targets = vec!["a".into(), "b".into()];

        assert_eq!(sync_env(&store, env.clone(), &service).await.unwrap(), RecordOutcome::Created);

        env.targets = vec!["b".into(), "a".into()];
        env.description = "ignored".into();
        assert_eq!(sync_env(&store, env.clone(), &service).await.unwrap(), RecordOutcome::Unchanged);

        env.targets.push("c".into());
        assert_eq!(sync_env(&store, env.clone(), &service).await.unwrap(), RecordOutcome::Updated);
        assert_eq!(store.get_entity(&env).await.unwrap().targets.len(), 3);
    }

    #[tokio::test]
    async fn test_project_is_created_with_defaults_and_never_updated() {
        let store = InMemoryStore::new();
        let service = RecordingProjects::default();
        let creator = ProjectCreator::new(Some(&service as &dyn ProjectService), "admin", "auto");
        let mut request = CreateProjectRequest::new("team");
        request.owner = "someone".into();

        assert_eq!(sync_project(&store, &request, &creator).await.unwrap(), RecordOutcome::Created);
        let sent = service.requests.lock().unwrap().clone();
        assert_eq!(sent[0].owner, "admin");
        assert_eq!(sent[0].description, "auto");

        store.add_entity(&mut Project::new("team")).await.unwrap();
        assert_eq!(
            sync_project(&store, &request, &creator).await.unwrap(),
            RecordOutcome::Unchanged
        );
        assert_eq!(service.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_project_already_exists_is_tolerated() {
        let store = InMemoryStore::new();
        let service = RecordingProjects {
            already_exists: true,
            ..Default::default()
        };
        let creator = ProjectCreator::new(Some(&service as &dyn ProjectService), "admin", "auto");
        let outcome = sync_project(&store, &CreateProjectRequest::new("team"), &creator)
            .await
            .unwrap();
        assert_eq!(outcome, RecordOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn test_project_without_service_is_skipped() {
        let store = InMemoryStore::new();
        let creator = ProjectCreator::new(None, "admin", "auto");
        let outcome = sync_project(&store, &CreateProjectRequest::new("team"), &creator)
            .await
            .unwrap();
        assert_eq!(outcome, RecordOutcome::Skipped);
        assert!(!store.entity_exists(&Project::new("team")).await.unwrap());
    }

    #[tokio::test]
    async fn test_targets_are_create_only() {
        let store = InMemoryStore::new();
        let service = crate::services::StoreTargetService::new(std::sync::Arc::new(store.clone()));

        let mut existing = Target::new("local");
        existing.description = "original".into();
        store.add_entity(&mut existing).await.unwrap();

        let mut changed = Target::new("local");
        changed.description = "changed".into();
        let outcomes = sync_targets(&store, vec![changed, Target::new("remote")], &service)
            .await
            .unwrap();

        assert_eq!(
            outcomes,
            vec![
                ("local".to_string(), RecordOutcome::Unchanged),
                ("remote".to_string(), RecordOutcome::Created),
            ]
        );
        assert_eq!(store.get_entity(&existing).await.unwrap().description, "original");
        assert_eq!(store.get_entity(&Target::new("remote")).await.unwrap().alias, "remote");
    }
}
