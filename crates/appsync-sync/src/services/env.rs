use appsync_core::{Env, index_of};
use appsync_storage::{DynStore, EntityStore};
use async_trait::async_trait;

use super::{CreateEnvRequest, EnvService, ServiceError, alias_or_name};

/// Creates envs directly in a datastore.
///
/// Unless the request allows it, a target may be bound by at most one env
/// per project.
#[derive(Clone)]
pub struct StoreEnvService {
    store: DynStore,
}

impl StoreEnvService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    async fn check_target_conflict(&self, env: &Env) -> Result<(), ServiceError> {
        if env.targets.is_empty() {
            return Ok(());
        }
        let scope = index_of(&[("project", &env.project)]);
        let others: Vec<Env> = self.store.list_entities(&scope, None).await?;
        let wanted = env.target_set();
        for other in others.iter().filter(|other| other.name != env.name) {
            if let Some(target) = other.target_set().intersection(&wanted).next() {
                return Err(ServiceError::conflict(format!(
                    "target {target} is already used by env {}",
                    other.name
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EnvService for StoreEnvService {
    async fn create_env(&self, request: CreateEnvRequest) -> Result<Env, ServiceError> {
        let alias = alias_or_name("env", &request.name, &request.alias)?;
        let mut env = Env {
            name: request.name,
            alias,
            description: request.description,
            project: request.project,
            namespace: request.namespace,
            targets: request.targets,
            ..Default::default()
        };
        if self.store.entity_exists(&env).await? {
            return Err(ServiceError::already_exists("env", env.name));
        }
        if !request.allow_target_conflict {
            self.check_target_conflict(&env).await?;
        }
        self.store.add_entity(&mut env).await.map_err(|err| {
            if err.is_already_exists() {
                ServiceError::already_exists("env", env.name.clone())
            } else {
                err.into()
            }
        })?;
        tracing::debug!(env = %env.name, targets = env.targets.len(), "env created");
        Ok(env)
    }
}
