use appsync_core::Target;
use appsync_storage::{DynStore, EntityStore};
use async_trait::async_trait;

use super::{CreateTargetRequest, ServiceError, TargetService, alias_or_name};

/// Creates deployment targets directly in a datastore.
#[derive(Clone)]
pub struct StoreTargetService {
    store: DynStore,
}

impl StoreTargetService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TargetService for StoreTargetService {
    async fn create_target(&self, request: CreateTargetRequest) -> Result<Target, ServiceError> {
        let alias = alias_or_name("target", &request.name, &request.alias)?;
        let mut target = Target {
            name: request.name,
            alias,
            project: request.project,
            description: request.description,
            cluster: request.cluster,
            variable: request.variable,
            ..Default::default()
        };
        if self.store.entity_exists(&target).await? {
            return Err(ServiceError::already_exists("target", target.name));
        }
        self.store.add_entity(&mut target).await.map_err(|err| {
            if err.is_already_exists() {
                ServiceError::already_exists("target", target.name.clone())
            } else {
                err.into()
            }
        })?;
        tracing::debug!(target_name = %target.name, "target created");
        Ok(target)
    }
}
