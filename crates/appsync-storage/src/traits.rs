//! Storage traits for the datastore abstraction layer.

use appsync_core::{Entity, Index, now_utc};
use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{FilterOptions, ListOptions, StoredRecord};

/// Keyed-record store every backend implements.
///
/// Records are addressed by `(table, key)`. Implementations must be
/// thread-safe and provide per-key atomicity for single operations; no
/// cross-record transactions are assumed.
///
/// # Example
///
/// ```ignore
/// use appsync_storage::{DataStore, StorageError};
///
/// async fn env_exists(store: &dyn DataStore, name: &str) -> Result<bool, StorageError> {
///     store.is_exist("env", name).await
/// }
/// ```
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if the key is taken.
    async fn add(&self, record: StoredRecord) -> Result<(), StorageError>;

    /// Overwrites the full content of an existing record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record does not exist.
    async fn put(&self, record: StoredRecord) -> Result<(), StorageError>;

    /// Reads a record by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record does not exist.
    async fn get(&self, table: &str, key: &str) -> Result<StoredRecord, StorageError>;

    /// Removes a record by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record is already gone.
    async fn delete(&self, table: &str, key: &str) -> Result<(), StorageError>;

    /// Lists the records of a table whose index contains every `scope` pair,
    /// then applies filtering, sorting and pagination from `options`.
    async fn list(
        &self,
        table: &str,
        scope: &Index,
        options: Option<&ListOptions>,
    ) -> Result<Vec<StoredRecord>, StorageError>;

    /// Counts the records a `list` with the same scope and filter would return
    /// before pagination.
    async fn count(
        &self,
        table: &str,
        scope: &Index,
        filter: Option<&FilterOptions>,
    ) -> Result<u64, StorageError>;

    /// Returns whether a record exists.
    async fn is_exist(&self, table: &str, key: &str) -> Result<bool, StorageError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Typed access to any [`DataStore`].
///
/// `add_entity` stamps the create time (when unset) and the update time;
/// `put_entity` stamps only the update time. Callers that overwrite a
/// record must carry the original create time over themselves.
#[async_trait]
pub trait EntityStore: DataStore {
    /// Reads the stored version of `probe`, addressed by its primary key.
    async fn get_entity<T: Entity>(&self, probe: &T) -> Result<T, StorageError> {
        let key = probe.validated_key()?;
        self.get(T::TABLE, &key).await?.into_entity()
    }

    async fn add_entity<T: Entity>(&self, entity: &mut T) -> Result<(), StorageError> {
        let now = now_utc();
        if entity.create_time().is_unset() {
            entity.set_create_time(now);
        }
        entity.set_update_time(now);
        self.add(StoredRecord::from_entity(&*entity)?).await
    }

    async fn put_entity<T: Entity>(&self, entity: &mut T) -> Result<(), StorageError> {
        entity.set_update_time(now_utc());
        self.put(StoredRecord::from_entity(&*entity)?).await
    }

    async fn delete_entity<T: Entity>(&self, entity: &T) -> Result<(), StorageError> {
        let key = entity.validated_key()?;
        self.delete(T::TABLE, &key).await
    }

    async fn list_entities<T: Entity>(
        &self,
        scope: &Index,
        options: Option<&ListOptions>,
    ) -> Result<Vec<T>, StorageError> {
        self.list(T::TABLE, scope, options)
            .await?
            .into_iter()
            .map(|record| record.into_entity::<T>())
            .collect()
    }

    async fn count_entities<T: Entity>(
        &self,
        scope: &Index,
        filter: Option<&FilterOptions>,
    ) -> Result<u64, StorageError> {
        self.count(T::TABLE, scope, filter).await
    }

    async fn entity_exists<T: Entity>(&self, probe: &T) -> Result<bool, StorageError> {
        let key = probe.validated_key()?;
        self.is_exist(T::TABLE, &key).await
    }
}

impl<S: DataStore + ?Sized> EntityStore for S {}
