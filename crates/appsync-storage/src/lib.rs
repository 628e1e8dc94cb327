//! # appsync-storage
//!
//! Datastore abstraction used by application sync.
//!
//! This crate defines the traits and types that all storage backends must
//! implement. It does not contain a backend itself; see `appsync-db-memory`.
//!
//! ## Overview
//!
//! [`DataStore`] is an object-safe keyed-record store (`add`, `put`, `get`,
//! `list`, `delete`, ...) working on [`StoredRecord`]s. [`EntityStore`] layers
//! typed access for any [`appsync_core::Entity`] on top of every `DataStore`,
//! including `dyn DataStore`:
//!
//! ```ignore
//! use appsync_core::Application;
//! use appsync_storage::{DynStore, EntityStore, StorageError};
//!
//! async fn load_app(store: &DynStore, name: &str) -> Result<Application, StorageError> {
//!     store.get_entity(&Application::new(name)).await
//! }
//! ```

mod error;
pub mod evented;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use evented::EventedStore;
pub use traits::{DataStore, EntityStore};
pub use types::{
    FilterOptions, FuzzyQueryOption, InQueryOption, IsNotExistQueryOption, ListOptions,
    SortOption, SortOrder, StoredRecord,
};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shareable store trait object.
pub type DynStore = std::sync::Arc<dyn DataStore>;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::traits::{DataStore, EntityStore};
    pub use crate::types::{FilterOptions, ListOptions, SortOrder, StoredRecord};
    pub use crate::{DynStore, StorageResult};
}
