//! Dispatcher queue port.

use crate::notification::domain::TransitionEvent;
use crate::workitem::domain::{Status, WorkItemRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Job descriptor carried across the queue boundary.
///
/// Descriptors are self-contained serialisable values: a durable queue
/// adapter may persist them, and workers rebuild everything else from the
/// store at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationJob {
    /// A work item's status changed; notify its actors.
    StatusChanged {
        /// Item whose status changed.
        item: WorkItemRef,
        /// Status before the write, captured at submit time.
        old_status: Status,
        /// Status after the write, captured at submit time.
        new_status: Status,
    },
    /// A task is past its due date; remind its actors.
    OverdueReminder {
        /// The overdue item.
        item: WorkItemRef,
    },
}

impl From<TransitionEvent> for NotificationJob {
    fn from(event: TransitionEvent) -> Self {
        Self::StatusChanged {
            item: event.item,
            old_status: event.old_status,
            new_status: event.new_status,
        }
    }
}

/// Fire-and-forget queue contract.
///
/// Submission returns as soon as the job is enqueued; execution happens on a
/// worker with at-least-once semantics and no ordering guarantee across
/// workers. A failed submission loses the job — callers log and move on,
/// they never propagate the failure into the write path.
pub trait NotificationQueue: Send + Sync {
    /// Enqueues a job for asynchronous execution.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError`] when the job could not be enqueued.
    fn submit(&self, job: NotificationJob) -> Result<(), QueueError>;
}

/// Errors returned by queue adapters.
#[derive(Debug, Clone, Error)]
pub enum QueueError {
    /// The queue has shut down and accepts no further jobs.
    #[error("notification queue is closed")]
    Closed,

    /// Queue-backend failure.
    #[error("queue backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl QueueError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
