use std::sync::Arc;

use appsync_core::ClusterTarget;
use appsync_db_memory::create_memory_store;
use appsync_storage::EntityStore;
use appsync_sync::{
    CreateEnvRequest, CreateProjectRequest, CreateTargetRequest, EnvService, ProjectService,
    ServiceError, StoreEnvService, StoreProjectService, StoreTargetService, TargetService,
};

fn env_request(name: &str, targets: &[&str]) -> CreateEnvRequest {
    CreateEnvRequest {
        name: name.into(),
        project: "team".into(),
        namespace: name.into(),
        targets: targets.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn project_alias_defaults_and_duplicates_are_rejected() {
    let store = create_memory_store();
    let service = StoreProjectService::new(store.clone());

    let mut request = CreateProjectRequest::new("team");
    request.owner = "admin".into();
    let project = service.create_project(request.clone()).await.unwrap();
    assert_eq!(project.alias, "team");
    assert!(!project.base.create_time.is_unset());
    assert!(store.entity_exists(&project).await.unwrap());

    let err = service.create_project(request).await.unwrap_err();
    assert!(err.is_already_exists());

    let err = service
        .create_project(CreateProjectRequest::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRequest { .. }));
}

#[tokio::test]
async fn env_targets_must_not_overlap_unless_allowed() {
    let store = create_memory_store();
    let service = StoreEnvService::new(store.clone());

    service.create_env(env_request("dev", &["t1", "t2"])).await.unwrap();

    let err = service
        .create_env(env_request("staging", &["t2", "t3"]))
        .await
        .unwrap_err();
    match err {
        ServiceError::Conflict { message } => {
            assert!(message.contains("t2"));
            assert!(message.contains("dev"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let allowed = CreateEnvRequest {
        allow_target_conflict: true,
        ..env_request("staging", &["t2", "t3"])
    };
    let env = service.create_env(allowed).await.unwrap();
    assert_eq!(env.alias, "staging");

    let err = service
        .create_env(env_request("dev", &["t9"]))
        .await
        .unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn envs_of_other_projects_do_not_conflict() {
    let store = create_memory_store();
    let service = StoreEnvService::new(store);

    service.create_env(env_request("dev", &["t1"])).await.unwrap();
    let other = CreateEnvRequest {
        project: "elsewhere".into(),
        ..env_request("prod", &["t1"])
    };
    assert!(service.create_env(other).await.is_ok());
}

#[tokio::test]
async fn target_creation_keeps_cluster_details() {
    let store = create_memory_store();
    let service: Arc<dyn TargetService> = Arc::new(StoreTargetService::new(store.clone()));

    let request = CreateTargetRequest {
        name: "local".into(),
        project: "team".into(),
        cluster: Some(ClusterTarget {
            cluster_name: "local".into(),
            namespace: "default".into(),
        }),
        ..Default::default()
    };
    let target = service.create_target(request.clone()).await.unwrap();
    assert_eq!(target.alias, "local");

    let stored = store.get_entity(&target).await.unwrap();
    assert_eq!(stored.cluster, request.cluster);

    let err = service.create_target(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyExists { kind: "target", .. }));
}
