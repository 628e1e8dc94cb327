//! # appsync-core
//!
//! Shared building blocks for synchronizing application descriptions into a
//! keyed-record datastore:
//!
//! - [`entity`]: the [`Entity`] shape trait every persisted record implements
//! - [`model`]: the application-scoped entities (applications, envs, components, ...)
//! - [`ownership`]: who is allowed to delete a collection member
//! - [`events`]: record change notifications
//! - [`time`]: the [`Timestamp`] used for create/update times

pub mod entity;
pub mod error;
pub mod events;
pub mod model;
pub mod ownership;
pub mod time;

pub use entity::{BaseModel, Entity, Index, KEY_SEPARATOR, compose_key, index_of};
pub use error::{CoreError, Result};
pub use model::{
    Application, ApplicationComponent, ApplicationPolicy, ApplicationRevision, ApplicationTrait,
    ClusterTarget, Env, EnvBinding, Project, Target, Workflow, WorkflowRecord, WorkflowStep,
    WorkflowStepStatus,
};
pub use ownership::Ownership;
pub use time::{Timestamp, now_utc};
