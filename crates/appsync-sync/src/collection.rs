//! Collection sync for application-scoped members (components, policies).
//!
//! Members are matched by name within the owning application. Stale members
//! are deleted only when sync owns them; deletion is best effort per member.
//! Creates and updates run afterwards and stop at the first failure.

use std::collections::BTreeMap;

use appsync_core::{
    ApplicationComponent, ApplicationPolicy, Entity, Index, Ownership, Timestamp, index_of,
};
use appsync_storage::{DataStore, EntityStore};
use tracing::{debug, warn};

use crate::compare::three_way_compare;
use crate::error::{SyncError, SyncResult};
use crate::report::{CollectionReport, DeleteFailure};

/// A named member of an application-scoped collection.
pub trait CollectionMember: Entity {
    const KIND: &'static str;

    fn name(&self) -> &str;

    fn ownership(&self) -> Ownership;

    /// Index scope selecting every member owned by `app_key`.
    fn owner_scope(app_key: &str) -> Index {
        index_of(&[("appPrimaryKey", app_key)])
    }

    /// Whether sync may delete this member once it is no longer desired.
    fn deletable_by_sync(&self) -> bool {
        self.ownership().is_sync_managed()
    }
}

impl CollectionMember for ApplicationComponent {
    const KIND: &'static str = "component";

    fn name(&self) -> &str {
        &self.name
    }

    fn ownership(&self) -> Ownership {
        self.ownership
    }
}

impl CollectionMember for ApplicationPolicy {
    const KIND: &'static str = "policy";

    fn name(&self) -> &str {
        &self.name
    }

    fn ownership(&self) -> Ownership {
        self.ownership
    }

    fn deletable_by_sync(&self) -> bool {
        self.ownership.is_sync_managed() && !self.reference
    }
}

/// Converges the members of `app_key` towards `desired`.
///
/// A blank `app_key` is rejected before any I/O, since it would scope the
/// listing to every application.
///
/// Delete failures other than not-found are logged and collected in the
/// report. The first create or update failure is returned and the remaining
/// members are not attempted; earlier writes are kept.
pub async fn sync_collection<T: CollectionMember>(
    store: &dyn DataStore,
    app_key: &str,
    desired: Vec<T>,
) -> SyncResult<CollectionReport> {
    if app_key.trim().is_empty() {
        return Err(SyncError::invalid_envelope(format!(
            "{} sync needs a non-empty application key",
            T::KIND
        )));
    }
    let mut report = CollectionReport::new(T::KIND);

    let existing: Vec<T> = store
        .list_entities(&T::owner_scope(app_key), None)
        .await?;
    let partition = three_way_compare(
        existing.iter().map(|m| m.name()),
        desired.iter().map(|m| m.name()),
    );

    for member in existing
        .iter()
        .filter(|m| partition.to_delete.contains(m.name()))
    {
        if !member.deletable_by_sync() {
            report.retained.push(member.name().to_string());
            continue;
        }
        match store.delete_entity(member).await {
            Ok(()) => {
                debug!(kind = T::KIND, app = %app_key, name = %member.name(), "member deleted");
                report.deleted.push(member.name().to_string());
            }
            Err(err) if err.is_not_found() => {
                debug!(kind = T::KIND, app = %app_key, name = %member.name(), "member already gone");
                report.deleted.push(member.name().to_string());
            }
            Err(err) => {
                warn!(
                    kind = T::KIND,
                    app = %app_key,
                    name = %member.name(),
                    error.category = %err.category(),
                    error = %err,
                    "failed to delete member, continuing"
                );
                report.delete_failures.push(DeleteFailure {
                    name: member.name().to_string(),
                    error: err,
                });
            }
        }
    }

    let mut create_times: BTreeMap<String, Timestamp> = existing
        .iter()
        .map(|m| (m.name().to_string(), m.create_time()))
        .collect();
    let mut to_add = partition.to_add;

    for mut member in desired {
        let name = member.name().to_string();
        if to_add.remove(&name) {
            store.add_entity(&mut member).await?;
            debug!(kind = T::KIND, app = %app_key, name = %name, "member created");
            create_times.insert(name.clone(), member.create_time());
            report.created.push(name);
        } else {
            if let Some(created) = create_times.get(&name) {
                member.set_create_time(*created);
            }
            store.put_entity(&mut member).await?;
            debug!(kind = T::KIND, app = %app_key, name = %name, "member updated");
            report.updated.push(name);
        }
    }

    Ok(report)
}

pub async fn sync_components(
    store: &dyn DataStore,
    app_key: &str,
    components: Vec<ApplicationComponent>,
) -> SyncResult<CollectionReport> {
    sync_collection(store, app_key, components).await
}

pub async fn sync_policies(
    store: &dyn DataStore,
    app_key: &str,
    policies: Vec<ApplicationPolicy>,
) -> SyncResult<CollectionReport> {
    sync_collection(store, app_key, policies).await
}
