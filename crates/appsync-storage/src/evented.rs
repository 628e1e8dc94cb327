//! EventedStore - A store wrapper that emits events after mutations.
//!
//! # Example
//!
//! ```ignore
//! use appsync_storage::EventedStore;
//! use appsync_core::events::EventBroadcaster;
//!
//! let broadcaster = EventBroadcaster::new_shared();
//! let store = EventedStore::new(memory_store, broadcaster.clone());
//! let mut events = broadcaster.subscribe();
//! ```

use std::sync::Arc;

use appsync_core::Index;
use appsync_core::events::{EventBroadcaster, RecordEvent};
use async_trait::async_trait;
use tracing::debug;

use crate::error::StorageError;
use crate::traits::DataStore;
use crate::types::{FilterOptions, ListOptions, StoredRecord};

/// A store wrapper that emits a [`RecordEvent`] after each successful
/// `add`, `put` or `delete`. Failed operations and reads emit nothing.
pub struct EventedStore<S: DataStore> {
    inner: S,
    broadcaster: Arc<EventBroadcaster>,
}

impl<S: DataStore> EventedStore<S> {
    pub fn new(inner: S, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self { inner, broadcaster }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn broadcaster(&self) -> &Arc<EventBroadcaster> {
        &self.broadcaster
    }

    fn emit(&self, event: RecordEvent) {
        if !self.broadcaster.has_subscribers() {
            return;
        }
        let operation = event.operation;
        let table = event.table.clone();
        let key = event.key.clone();
        let count = self.broadcaster.send(event);
        debug!(
            %operation,
            table = %table,
            key = %key,
            subscribers = count,
            "Emitted record event"
        );
    }
}

#[async_trait]
impl<S: DataStore> DataStore for EventedStore<S> {
    async fn add(&self, record: StoredRecord) -> Result<(), StorageError> {
        let event = RecordEvent::created(&record.table, &record.key);
        self.inner.add(record).await?;
        self.emit(event);
        Ok(())
    }

    async fn put(&self, record: StoredRecord) -> Result<(), StorageError> {
        let event = RecordEvent::updated(&record.table, &record.key);
        self.inner.put(record).await?;
        self.emit(event);
        Ok(())
    }

    async fn get(&self, table: &str, key: &str) -> Result<StoredRecord, StorageError> {
        self.inner.get(table, key).await
    }

    async fn delete(&self, table: &str, key: &str) -> Result<(), StorageError> {
        self.inner.delete(table, key).await?;
        self.emit(RecordEvent::deleted(table, key));
        Ok(())
    }

    async fn list(
        &self,
        table: &str,
        scope: &Index,
        options: Option<&ListOptions>,
    ) -> Result<Vec<StoredRecord>, StorageError> {
        self.inner.list(table, scope, options).await
    }

    async fn count(
        &self,
        table: &str,
        scope: &Index,
        filter: Option<&FilterOptions>,
    ) -> Result<u64, StorageError> {
        self.inner.count(table, scope, filter).await
    }

    async fn is_exist(&self, table: &str, key: &str) -> Result<bool, StorageError> {
        self.inner.is_exist(table, key).await
    }

    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }
}

impl<S: DataStore> std::fmt::Debug for EventedStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventedStore")
            .field("backend", &self.inner.backend_name())
            .field("subscriber_count", &self.broadcaster.subscriber_count())
            .finish()
    }
}
