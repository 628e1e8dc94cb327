//! Storage types for the datastore abstraction layer.

use appsync_core::{Entity, Index};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;

/// A record as handed to and returned by a storage backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Table (entity kind) the record belongs to.
    pub table: String,
    /// Primary key within the table.
    pub key: String,
    /// Indexed fields used for scoped listing.
    pub index: Index,
    /// Full record content.
    pub value: Value,
}

impl StoredRecord {
    /// Encodes an entity, rejecting empty primary keys.
    pub fn from_entity<T: Entity>(entity: &T) -> Result<Self, StorageError> {
        let key = entity.validated_key()?;
        Ok(Self {
            table: T::TABLE.to_string(),
            key,
            index: entity.index(),
            value: serde_json::to_value(entity)?,
        })
    }

    /// Decodes the stored content into an entity.
    pub fn into_entity<T: Entity>(self) -> Result<T, StorageError> {
        serde_json::from_value(self.value).map_err(|e| {
            StorageError::serialization(format!("{}/{}: {e}", self.table, self.key))
        })
    }

    /// Returns true if every scope pair is present in this record's index.
    #[must_use]
    pub fn matches_scope(&self, scope: &Index) -> bool {
        scope
            .iter()
            .all(|(field, value)| self.index.get(field) == Some(value))
    }
}

/// Options for a list operation: pagination, sorting and filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// 1-based page number. Ignored without a page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort_by: Vec<SortOption>,
    #[serde(default)]
    pub filter: FilterOptions,
}

impl ListOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by.push(SortOption::new(key, order));
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the (offset, limit) window, if pagination applies.
    #[must_use]
    pub fn window(&self) -> Option<(usize, usize)> {
        let size = self.page_size.filter(|s| *s > 0)?;
        let page = self.page.unwrap_or(1).max(1);
        Some(((page - 1) * size, size))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A sort key for list results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOption {
    /// Top-level field of the stored value.
    pub key: String,
    pub order: SortOrder,
}

impl SortOption {
    #[must_use]
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            key: key.into(),
            order,
        }
    }
}

/// Field filters applied on top of the index scope. All conditions must hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Substring matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<FuzzyQueryOption>,
    /// Value must be one of a set.
    #[serde(default, rename = "in", skip_serializing_if = "Vec::is_empty")]
    pub in_: Vec<InQueryOption>,
    /// Field must be missing or empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub is_not_exist: Vec<IsNotExistQueryOption>,
}

impl FilterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, query: impl Into<String>) -> Self {
        self.queries.push(FuzzyQueryOption {
            key: key.into(),
            query: query.into(),
        });
        self
    }

    #[must_use]
    pub fn with_in(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.in_.push(InQueryOption {
            key: key.into(),
            values,
        });
        self
    }

    #[must_use]
    pub fn with_not_exist(mut self, key: impl Into<String>) -> Self {
        self.is_not_exist
            .push(IsNotExistQueryOption { key: key.into() });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty() && self.in_.is_empty() && self.is_not_exist.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyQueryOption {
    pub key: String,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InQueryOption {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsNotExistQueryOption {
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use appsync_core::{ApplicationComponent, Target, index_of};

    #[test]
    fn test_stored_record_from_entity() {
        let comp = ApplicationComponent::new("app", "web");
        let record = StoredRecord::from_entity(&comp).unwrap();
        assert_eq!(record.table, "application_component");
        assert_eq!(record.key, "app/web");
        assert!(record.matches_scope(&index_of(&[("appPrimaryKey", "app")])));
        assert!(!record.matches_scope(&index_of(&[("appPrimaryKey", "other")])));

        let back: ApplicationComponent = record.into_entity().unwrap();
        assert_eq!(back, comp);
    }

    #[test]
    fn test_stored_record_rejects_empty_key() {
        let err = StoredRecord::from_entity(&Target::new("")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidRecord { .. }));
    }

    #[test]
    fn test_list_options_window() {
        assert_eq!(ListOptions::new().window(), None);
        assert_eq!(ListOptions::new().with_page(1, 10).window(), Some((0, 10)));
        assert_eq!(ListOptions::new().with_page(3, 5).window(), Some((10, 5)));
        assert_eq!(ListOptions::new().with_page(0, 5).window(), Some((0, 5)));

        let page_only = ListOptions {
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(page_only.window(), None);
    }

    #[test]
    fn test_filter_options_builder() {
        let filter = FilterOptions::new()
            .with_query("name", "web")
            .with_in("type", vec!["webservice".into(), "worker".into()])
            .with_not_exist("envName");
        assert!(!filter.is_empty());
        assert_eq!(filter.in_[0].values.len(), 2);

        let json = serde_json::to_value(&filter).unwrap();
        assert!(json.get("in").is_some());
    }
}
