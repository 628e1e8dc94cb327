//! Application-scoped entities persisted by sync.
//!
//! Singletons per application: [`Project`] (by name), [`Application`],
//! [`Env`], [`EnvBinding`], [`Workflow`], [`WorkflowRecord`],
//! [`ApplicationRevision`]. Collections per application:
//! [`ApplicationComponent`] and [`ApplicationPolicy`]. [`Target`]s are
//! global and shared between applications.

mod application;
mod component;
mod env;
mod policy;
mod project;
mod revision;
mod target;
mod workflow;

pub use application::Application;
pub use component::{ApplicationComponent, ApplicationTrait};
pub use env::{Env, EnvBinding};
pub use policy::ApplicationPolicy;
pub use project::Project;
pub use revision::ApplicationRevision;
pub use target::{ClusterTarget, Target};
pub use workflow::{Workflow, WorkflowRecord, WorkflowStep, WorkflowStepStatus};
