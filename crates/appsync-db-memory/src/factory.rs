use std::sync::Arc;

use appsync_storage::DynStore;

use crate::InMemoryStore;

/// Supported store backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory store implemented on top of papaya::HashMap
    InMemoryPapaya,
}

/// Store-specific configuration options.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Initial capacity of the record map.
    pub preallocate_items: Option<usize>,
}

/// Factory configuration to construct a store instance.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub options: StoreOptions,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::InMemoryPapaya,
            options: StoreOptions::default(),
        }
    }
}

/// Create a store instance based on the provided configuration.
pub fn create_store(config: &StoreConfig) -> DynStore {
    match config.backend {
        StoreBackend::InMemoryPapaya => Arc::new(InMemoryStore::with_options(config.options.clone())),
    }
}
