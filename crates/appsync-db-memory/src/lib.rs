//! In-memory datastore backend for application sync.
//!
//! This crate provides an in-memory implementation of the `DataStore` trait
//! from `appsync-storage`, using a papaya lock-free HashMap for concurrent
//! access.
//!
//! # Example
//!
//! ```ignore
//! use appsync_core::Application;
//! use appsync_db_memory::InMemoryStore;
//! use appsync_storage::EntityStore;
//!
//! let store = InMemoryStore::new();
//! store.add_entity(&mut Application::new("demo")).await?;
//! ```

pub mod factory;
pub mod query;
pub mod storage;

// Re-export the DataStore trait for convenience
pub use appsync_storage::{DataStore, EntityStore, StorageError, StoredRecord};

pub use factory::{StoreBackend, StoreConfig, StoreOptions, create_store};
pub use storage::{InMemoryStore, StorageKey};

/// Creates a new shareable in-memory store.
pub fn create_memory_store() -> appsync_storage::DynStore {
    std::sync::Arc::new(InMemoryStore::new())
}
