use appsync_core::Project;
use appsync_storage::{DynStore, EntityStore};
use async_trait::async_trait;

use super::{CreateProjectRequest, ProjectService, ServiceError, alias_or_name};

/// Creates projects directly in a datastore.
#[derive(Clone)]
pub struct StoreProjectService {
    store: DynStore,
}

impl StoreProjectService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectService for StoreProjectService {
    async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, ServiceError> {
        let alias = alias_or_name("project", &request.name, &request.alias)?;
        let mut project = Project {
            name: request.name,
            alias,
            owner: request.owner,
            description: request.description,
            ..Default::default()
        };
        if self.store.entity_exists(&project).await? {
            return Err(ServiceError::already_exists("project", project.name));
        }
        self.store.add_entity(&mut project).await.map_err(|err| {
            if err.is_already_exists() {
                ServiceError::already_exists("project", project.name.clone())
            } else {
                err.into()
            }
        })?;
        tracing::debug!(project = %project.name, owner = %project.owner, "project created");
        Ok(project)
    }
}
