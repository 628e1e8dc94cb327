use std::sync::Arc;

use appsync_core::Index;
use appsync_storage::{
    DataStore, FilterOptions, ListOptions, StorageError, StorageResult, StoredRecord,
};
use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;

use crate::factory::StoreOptions;
use crate::query::{apply_list_options, matches_filter};

pub type StorageKey = String; // Format: "table/key"

pub(crate) fn make_storage_key(table: &str, key: &str) -> StorageKey {
    format!("{table}/{key}")
}

/// In-memory datastore backed by a papaya lock-free HashMap.
///
/// Every single-record operation is atomic per key: `add` uses
/// `try_insert`, `put` uses a compare-and-swap `update` and `delete` a
/// single `remove`. Guards are never held across await points.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    pub(crate) data: Arc<PapayaHashMap<StorageKey, StoredRecord>>,
    _options: StoreOptions,
}

impl InMemoryStore {
    /// Creates a new in-memory store with default options.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Creates a new in-memory store with the given options.
    pub fn with_options(options: StoreOptions) -> Self {
        let data = match options.preallocate_items {
            Some(capacity) => PapayaHashMap::with_capacity(capacity),
            None => PapayaHashMap::new(),
        };
        Self {
            data: Arc::new(data),
            _options: options,
        }
    }

    /// Total number of records across all tables.
    pub fn len(&self) -> usize {
        self.data.pin().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn scoped(&self, table: &str, scope: &Index) -> Vec<StoredRecord> {
        let guard = self.data.pin();
        guard
            .iter()
            .filter(|(_, record)| record.table == table && record.matches_scope(scope))
            .map(|(_, record)| record.clone())
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn add(&self, record: StoredRecord) -> StorageResult<()> {
        let key = make_storage_key(&record.table, &record.key);
        let guard = self.data.pin();
        match guard.try_insert(key, record) {
            Ok(_) => Ok(()),
            Err(occupied) => Err(StorageError::already_exists(
                occupied.not_inserted.table,
                occupied.not_inserted.key,
            )),
        }
    }

    async fn put(&self, record: StoredRecord) -> StorageResult<()> {
        let key = make_storage_key(&record.table, &record.key);
        let guard = self.data.pin();
        match guard.update(key, |_| record.clone()) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found(record.table, record.key)),
        }
    }

    async fn get(&self, table: &str, key: &str) -> StorageResult<StoredRecord> {
        let guard = self.data.pin();
        guard
            .get(&make_storage_key(table, key))
            .cloned()
            .ok_or_else(|| StorageError::not_found(table, key))
    }

    async fn delete(&self, table: &str, key: &str) -> StorageResult<()> {
        let guard = self.data.pin();
        match guard.remove(&make_storage_key(table, key)) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found(table, key)),
        }
    }

    async fn list(
        &self,
        table: &str,
        scope: &Index,
        options: Option<&ListOptions>,
    ) -> StorageResult<Vec<StoredRecord>> {
        Ok(apply_list_options(self.scoped(table, scope), options))
    }

    async fn count(
        &self,
        table: &str,
        scope: &Index,
        filter: Option<&FilterOptions>,
    ) -> StorageResult<u64> {
        let records = self.scoped(table, scope);
        let count = match filter {
            Some(filter) => records.iter().filter(|r| matches_filter(r, filter)).count(),
            None => records.len(),
        };
        Ok(count as u64)
    }

    async fn is_exist(&self, table: &str, key: &str) -> StorageResult<bool> {
        let guard = self.data.pin();
        Ok(guard.contains_key(&make_storage_key(table, key)))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
