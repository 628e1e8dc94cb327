//! # appsync-sync
//!
//! Reconciles the desired state of an application into a keyed-record
//! datastore without destroying records that sync does not own.
//!
//! - [`compare`]: three-way name comparison
//! - [`record`]: single-record sync (upsert, append-only, create-only)
//! - [`collection`]: ownership-gated collection sync
//! - [`services`]: project/env/target creation services
//! - [`driver`]: the [`Reconciler`] running every kind in order
//! - [`observability`]: config-driven tracing setup
//!
//! ```ignore
//! use appsync_db_memory::create_memory_store;
//! use appsync_sync::{DataStoreApp, ReconcilerBuilder};
//!
//! let cfg = appsync_config::loader::load_config(None)?;
//! let reconciler = ReconcilerBuilder::from_config(create_memory_store(), &cfg).build();
//! let report = reconciler.sync_application(app).await?;
//! for (kind, failure) in report.delete_failures() {
//!     tracing::warn!(kind, name = %failure.name, "stale member left behind");
//! }
//! ```

pub mod collection;
pub mod compare;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod observability;
pub mod record;
pub mod report;
pub mod services;

pub use collection::{CollectionMember, sync_collection, sync_components, sync_policies};
pub use compare::{NamePartition, three_way_compare};
pub use driver::{Reconciler, ReconcilerBuilder, SyncDefaults};
pub use envelope::DataStoreApp;
pub use error::{SyncError, SyncResult};
pub use record::{
    EnvCreator, ProjectCreator, RecordCreator, StoreInsert, SyncStrategy, SyncedRecord,
    TargetCreator, sync_app_meta, sync_env, sync_env_binding, sync_project, sync_record,
    sync_revision, sync_targets, sync_workflow, sync_workflow_record,
};
pub use report::{CollectionReport, DeleteFailure, RecordOutcome, SyncReport};
pub use services::{
    CreateEnvRequest, CreateProjectRequest, CreateTargetRequest, EnvService, ProjectService,
    ServiceError, StoreEnvService, StoreProjectService, StoreTargetService, TargetService,
};
