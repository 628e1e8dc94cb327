//! Outcomes of sync operations.

use std::fmt;

use appsync_storage::StorageError;

/// What a single-record sync did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordOutcome {
    /// Inserted as a new record.
    Created,
    /// Overwritten in place, create time preserved.
    Updated,
    /// Already converged, nothing written.
    Unchanged,
    /// A creation service reported the record as existing.
    AlreadyExists,
    /// Not attempted: the input or the creation service was absent.
    Skipped,
}

impl RecordOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::AlreadyExists => "already_exists",
            Self::Skipped => "skipped",
        }
    }

    /// Whether this outcome wrote to the datastore.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection member whose deletion failed without aborting the sync.
#[derive(Debug)]
pub struct DeleteFailure {
    pub name: String,
    pub error: StorageError,
}

/// What a collection sync did, by member name.
#[derive(Debug)]
pub struct CollectionReport {
    pub kind: &'static str,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    /// Stale members kept because sync does not own them.
    pub retained: Vec<String>,
    pub delete_failures: Vec<DeleteFailure>,
}

impl CollectionReport {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            created: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
            retained: Vec::new(),
            delete_failures: Vec::new(),
        }
    }

    /// True when every scheduled deletion succeeded.
    pub fn is_clean(&self) -> bool {
        self.delete_failures.is_empty()
    }
}

/// Result of reconciling one application.
#[derive(Debug)]
pub struct SyncReport {
    pub app: String,
    pub project: RecordOutcome,
    pub app_meta: RecordOutcome,
    pub env: RecordOutcome,
    pub env_binding: RecordOutcome,
    pub components: CollectionReport,
    pub policies: CollectionReport,
    pub workflow: RecordOutcome,
    pub workflow_record: RecordOutcome,
    pub revision: RecordOutcome,
    pub targets: Vec<(String, RecordOutcome)>,
}

impl SyncReport {
    /// Non-fatal delete failures across all collections, tagged by kind.
    pub fn delete_failures(&self) -> impl Iterator<Item = (&'static str, &DeleteFailure)> + '_ {
        [&self.components, &self.policies]
            .into_iter()
            .flat_map(|report| report.delete_failures.iter().map(move |f| (report.kind, f)))
    }

    pub fn has_delete_failures(&self) -> bool {
        self.delete_failures().next().is_some()
    }

    /// Number of records created or updated.
    pub fn writes(&self) -> usize {
        let singles = [
            self.project,
            self.app_meta,
            self.env,
            self.env_binding,
            self.workflow,
            self.workflow_record,
            self.revision,
        ]
        .iter()
        .chain(self.targets.iter().map(|(_, outcome)| outcome))
        .filter(|outcome| outcome.is_write())
        .count();
        let collections = [&self.components, &self.policies]
            .iter()
            .map(|r| r.created.len() + r.updated.len())
            .sum::<usize>();
        singles + collections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_failures() -> SyncReport {
        let mut components = CollectionReport::new("component");
        components.delete_failures.push(DeleteFailure {
            name: "web".into(),
            error: StorageError::internal("boom"),
        });
        components.created.push("db".into());
        let mut policies = CollectionReport::new("policy");
        policies.updated.push("topology".into());
        SyncReport {
            app: "demo".into(),
            project: RecordOutcome::Skipped,
            app_meta: RecordOutcome::Created,
            env: RecordOutcome::AlreadyExists,
            env_binding: RecordOutcome::Unchanged,
            components,
            policies,
            workflow: RecordOutcome::Updated,
            workflow_record: RecordOutcome::Unchanged,
            revision: RecordOutcome::Created,
            targets: vec![("local".into(), RecordOutcome::Created)],
        }
    }

    #[test]
    fn test_outcome_is_write() {
        assert!(RecordOutcome::Created.is_write());
        assert!(RecordOutcome::Updated.is_write());
        assert!(!RecordOutcome::AlreadyExists.is_write());
        assert_eq!(RecordOutcome::AlreadyExists.to_string(), "already_exists");
    }

    #[test]
    fn test_delete_failures_are_tagged_by_kind() {
        let report = report_with_failures();
        assert!(report.has_delete_failures());
        let failures: Vec<_> = report.delete_failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "component");
        assert_eq!(failures[0].1.name, "web");
        assert!(!report.components.is_clean());
        assert!(report.policies.is_clean());
    }

    #[test]
    fn test_write_count() {
        // app_meta, workflow, revision, one target, one component, one policy
        assert_eq!(report_with_failures().writes(), 6);
    }
}
