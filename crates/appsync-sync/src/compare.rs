//! Three-way name comparison between persisted and desired collections.

use std::collections::BTreeSet;

/// Disjoint split of the union of existing and desired names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePartition {
    /// Present on both sides.
    pub kept: BTreeSet<String>,
    /// Persisted but no longer desired.
    pub to_delete: BTreeSet<String>,
    /// Desired but not yet persisted.
    pub to_add: BTreeSet<String>,
}

/// Splits names into `kept = existing ∩ desired`, `to_delete = existing \ desired`
/// and `to_add = desired \ existing`.
///
/// Comparison is exact string equality and duplicates collapse.
pub fn three_way_compare<E, D>(existing: E, desired: D) -> NamePartition
where
    E: IntoIterator,
    E::Item: AsRef<str>,
    D: IntoIterator,
    D::Item: AsRef<str>,
{
    let existing: BTreeSet<String> = existing
        .into_iter()
        .map(|name| name.as_ref().to_owned())
        .collect();
    let desired: BTreeSet<String> = desired
        .into_iter()
        .map(|name| name.as_ref().to_owned())
        .collect();

    NamePartition {
        kept: existing.intersection(&desired).cloned().collect(),
        to_delete: existing.difference(&desired).cloned().collect(),
        to_add: desired.difference(&existing).cloned().collect(),
    }
}
