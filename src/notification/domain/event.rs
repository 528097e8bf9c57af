//! Transition events emitted when a work item's status changes.

use crate::workitem::domain::{Status, WorkItemRef};
use serde::{Deserialize, Serialize};

/// Ephemeral record of a status transition on one work item.
///
/// Events are never persisted or replayed; they exist between the write
/// path's after-hook and the dispatcher queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Item whose status changed.
    pub item: WorkItemRef,
    /// Status before the write.
    pub old_status: Status,
    /// Status after the write.
    pub new_status: Status,
}

impl TransitionEvent {
    /// Builds an event iff a transition actually occurred.
    ///
    /// Returns `None` when there is no prior status (the item was just
    /// created, or the pre-write lookup failed) or when the status did not
    /// change.
    #[must_use]
    pub fn detect(item: WorkItemRef, prior: Option<Status>, new_status: Status) -> Option<Self> {
        let old_status = prior?;
        if old_status == new_status {
            return None;
        }
        Some(Self {
            item,
            old_status,
            new_status,
        })
    }
}
