//! Filtering, sorting and pagination of listed records.
//!
//! Filters and sort keys address top-level fields of the stored JSON value.
//! Without explicit sort keys records come back ordered by primary key so
//! listings are deterministic.

use std::cmp::Ordering;

use appsync_storage::{FilterOptions, ListOptions, SortOrder, StoredRecord};
use serde_json::Value;

/// Applies filter, sort and page window from `options`.
pub fn apply_list_options(
    mut records: Vec<StoredRecord>,
    options: Option<&ListOptions>,
) -> Vec<StoredRecord> {
    let Some(options) = options else {
        records.sort_by(|a, b| a.key.cmp(&b.key));
        return records;
    };

    records.retain(|record| matches_filter(record, &options.filter));
    records.sort_by(|a, b| {
        for sort in &options.sort_by {
            let ordering = compare_values(a.value.get(&sort.key), b.value.get(&sort.key));
            let ordering = match sort.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.key.cmp(&b.key)
    });

    match options.window() {
        Some((offset, limit)) => records.into_iter().skip(offset).take(limit).collect(),
        None => records,
    }
}

/// Check if a record satisfies every condition of `filter`.
pub fn matches_filter(record: &StoredRecord, filter: &FilterOptions) -> bool {
    let value = &record.value;

    let fuzzy = filter.queries.iter().all(|q| {
        field_text(value, &q.key).is_some_and(|text| text.contains(&q.query))
    });
    let within = filter.in_.iter().all(|q| {
        field_text(value, &q.key).is_some_and(|text| q.values.iter().any(|v| *v == text))
    });
    let missing = filter
        .is_not_exist
        .iter()
        .all(|q| is_empty_field(value.get(&q.key)));

    fuzzy && within && missing
}

/// Textual form of a top-level field, `None` when missing or null.
fn field_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_empty_field(field: Option<&Value>) -> bool {
    match field {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(_) => false,
    }
}

/// Orders missing values first, then by JSON type-aware comparison.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
