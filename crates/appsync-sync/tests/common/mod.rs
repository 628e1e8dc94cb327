//! Shared fixtures for sync integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use appsync_core::{
    Application, ApplicationComponent, ApplicationPolicy, ApplicationRevision, Env, EnvBinding,
    Index, Ownership, Target, Workflow, WorkflowRecord,
};
use appsync_db_memory::InMemoryStore;
use appsync_storage::{
    DataStore, DynStore, FilterOptions, ListOptions, StorageError, StorageResult, StoredRecord,
};
use appsync_sync::{CreateProjectRequest, DataStoreApp};
use async_trait::async_trait;

/// Storage operation observed by [`FaultyStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub kind: &'static str,
    pub table: String,
    pub key: String,
}

/// In-memory store that fails chosen operations with an internal error and
/// logs every call it receives.
#[derive(Default)]
pub struct FaultyStore {
    inner: InMemoryStore,
    failing: Mutex<HashSet<(&'static str, String, String)>>,
    ops: Mutex<Vec<Op>>,
}

impl FaultyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every `kind` call on `table/key` fail.
    pub fn fail(&self, kind: &'static str, table: &str, key: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert((kind, table.to_string(), key.to_string()));
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    /// Keys touched by `kind` calls on `table`, in call order.
    pub fn keys(&self, kind: &str, table: &str) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter(|op| op.kind == kind && op.table == table)
            .map(|op| op.key)
            .collect()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().unwrap().clear();
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    fn record(&self, kind: &'static str, table: &str, key: &str) -> StorageResult<()> {
        self.ops.lock().unwrap().push(Op {
            kind,
            table: table.to_string(),
            key: key.to_string(),
        });
        let failing = self
            .failing
            .lock()
            .unwrap()
            .contains(&(kind, table.to_string(), key.to_string()));
        if failing {
            return Err(StorageError::internal(format!("injected {kind} failure on {table}/{key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for FaultyStore {
    async fn add(&self, record: StoredRecord) -> StorageResult<()> {
        self.record("add", &record.table, &record.key)?;
        self.inner.add(record).await
    }

    async fn put(&self, record: StoredRecord) -> StorageResult<()> {
        self.record("put", &record.table, &record.key)?;
        self.inner.put(record).await
    }

    async fn get(&self, table: &str, key: &str) -> StorageResult<StoredRecord> {
        self.record("get", table, key)?;
        self.inner.get(table, key).await
    }

    async fn delete(&self, table: &str, key: &str) -> StorageResult<()> {
        self.record("delete", table, key)?;
        self.inner.delete(table, key).await
    }

    async fn list(
        &self,
        table: &str,
        scope: &Index,
        options: Option<&ListOptions>,
    ) -> StorageResult<Vec<StoredRecord>> {
        self.record("list", table, "")?;
        self.inner.list(table, scope, options).await
    }

    async fn count(
        &self,
        table: &str,
        scope: &Index,
        filter: Option<&FilterOptions>,
    ) -> StorageResult<u64> {
        self.inner.count(table, scope, filter).await
    }

    async fn is_exist(&self, table: &str, key: &str) -> StorageResult<bool> {
        self.inner.is_exist(table, key).await
    }

    fn backend_name(&self) -> &'static str {
        "faulty-memory"
    }
}

pub fn as_dyn(store: &Arc<FaultyStore>) -> DynStore {
    store.clone()
}

pub fn component(app: &str, name: &str, ownership: Ownership) -> ApplicationComponent {
    let mut comp = ApplicationComponent::new(app, name);
    comp.component_type = "webservice".into();
    comp.ownership = ownership;
    comp
}

pub fn managed(app: &str, name: &str) -> ApplicationComponent {
    component(app, name, Ownership::SyncManaged)
}

pub fn managed_policy(app: &str, name: &str) -> ApplicationPolicy {
    let mut policy = ApplicationPolicy::new(app, name);
    policy.policy_type = "topology".into();
    policy.ownership = Ownership::SyncManaged;
    policy
}

/// A complete envelope for `app` with one of every kind.
pub fn full_app(app: &str) -> DataStoreApp {
    let mut meta = Application::new(app);
    meta.project = "team".into();

    let mut env = Env::new(format!("{app}-env"));
    env.project = "team".into();
    env.namespace = format!("{app}-ns");
    env.targets = vec![format!("{app}-target")];

    let mut target = Target::new(format!("{app}-target"));
    target.project = "team".into();

    let mut revision = ApplicationRevision::new(app, "v1");
    revision.env_name = env.name.clone();

    let mut record = WorkflowRecord::new(app, "rec-1");
    record.workflow_name = format!("workflow-{}", env.name);
    record.status = "running".into();

    let mut workflow = Workflow::new(app, format!("workflow-{}", env.name));
    workflow.env_name = env.name.clone();
    workflow.default = true;

    DataStoreApp {
        project: Some(CreateProjectRequest::new("team")),
        env_binding: Some(EnvBinding::new(app, env.name.clone())),
        env: Some(env),
        components: vec![managed(app, "web"), managed(app, "db")],
        policies: vec![managed_policy(app, "topology")],
        workflow: Some(workflow),
        record: Some(record),
        revision: Some(revision),
        targets: vec![target],
        app_meta: meta,
    }
}
