//! Shared validation helpers for work-item aggregates.

use super::{WorkItemDomainError, WorkItemKind};
use crate::account::domain::UserId;

/// Trims a title and rejects empty results.
pub(super) fn normalized_title(
    kind: WorkItemKind,
    value: impl Into<String>,
) -> Result<String, WorkItemDomainError> {
    let raw = value.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(WorkItemDomainError::EmptyTitle { kind });
    }
    Ok(normalized.to_owned())
}

/// Rejects reporter values that match the primary actor.
///
/// Applies to user stories and tasks; epics carry no such constraint.
pub(super) fn ensure_distinct_actors(
    kind: WorkItemKind,
    primary: Option<UserId>,
    reporter: Option<UserId>,
) -> Result<(), WorkItemDomainError> {
    match (primary, reporter) {
        (Some(primary_id), Some(reporter_id)) if primary_id == reporter_id => {
            Err(WorkItemDomainError::ReporterIsPrimaryActor { kind })
        }
        _ => Ok(()),
    }
}
