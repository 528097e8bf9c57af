//! Read-model snapshot of a work item for notification purposes.

use crate::account::domain::UserId;
use crate::workitem::domain::{Priority, Status, WorkItemRef};
use serde::{Deserialize, Serialize};

/// The slice of a work item the pipeline needs: identity, message metadata,
/// and the actor references recipients resolve from.
///
/// The primary actor is the owner for epics and the assignee for user
/// stories and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemSnapshot {
    /// Kind-tagged item reference.
    pub item: WorkItemRef,
    /// Current title.
    pub title: String,
    /// Current status.
    pub status: Status,
    /// Current priority.
    pub priority: Priority,
    /// Primary actor reference, if any.
    pub primary_actor: Option<UserId>,
    /// Reporter reference, if any.
    pub reporter: Option<UserId>,
}
