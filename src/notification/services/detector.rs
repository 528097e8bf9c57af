//! Status-transition detection around work-item writes.
//!
//! The write path brackets every persist with a pair of hooks: the
//! before-hook captures the currently persisted status as an explicit
//! [`StatusWatch`] value, and the after-hook compares it against the
//! just-written status and submits a transition event when they differ. One
//! routine serves all three work-item kinds; callers only vary the
//! [`WorkItemRef`] they pass in.

use crate::notification::domain::TransitionEvent;
use crate::notification::ports::{NotificationQueue, WorkItemDirectory};
use crate::workitem::domain::{Status, WorkItemRef};
use std::sync::Arc;
use tracing::warn;

/// Pre-write status captured by [`TransitionDetector::observe_before`].
///
/// An explicit context value threaded from the before-hook to the
/// after-hook. `prior` is `None` when the item did not exist yet (first
/// save) or when the lookup failed, both of which suppress the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWatch {
    item: WorkItemRef,
    prior: Option<Status>,
}

impl StatusWatch {
    /// Returns the watched item reference.
    #[must_use]
    pub const fn item(&self) -> WorkItemRef {
        self.item
    }

    /// Returns the captured pre-write status, if any.
    #[must_use]
    pub const fn prior(&self) -> Option<Status> {
        self.prior
    }
}

/// Observes work-item writes and submits transition events.
#[derive(Clone)]
pub struct TransitionDetector<D, Q>
where
    D: WorkItemDirectory,
    Q: NotificationQueue,
{
    directory: Arc<D>,
    queue: Arc<Q>,
}

impl<D, Q> TransitionDetector<D, Q>
where
    D: WorkItemDirectory,
    Q: NotificationQueue,
{
    /// Creates a detector over the given read port and dispatcher queue.
    #[must_use]
    pub const fn new(directory: Arc<D>, queue: Arc<Q>) -> Self {
        Self { directory, queue }
    }

    /// Captures the currently persisted status before a write.
    ///
    /// Must stay cheap: exactly one point lookup, executed inside the
    /// caller's write context. A lookup failure is logged and degrades to
    /// "no prior status" — it never fails the caller's write.
    pub async fn observe_before(&self, item: WorkItemRef) -> StatusWatch {
        let prior = match self.directory.fetch(item).await {
            Ok(found) => found.map(|snapshot| snapshot.status),
            Err(err) => {
                warn!(%item, error = %err, "pre-write status lookup failed, suppressing notification");
                None
            }
        };
        StatusWatch { item, prior }
    }

    /// Compares the captured status against the just-written one and
    /// submits a transition event when they differ.
    ///
    /// Submission is fire-and-forget: an enqueue failure is logged and the
    /// event is lost. Returns the event for observability; `None` means no
    /// transition occurred (creation or no-op save).
    pub fn observe_after(&self, watch: StatusWatch, new_status: Status) -> Option<TransitionEvent> {
        let event = TransitionEvent::detect(watch.item, watch.prior, new_status)?;
        if let Err(err) = self.queue.submit(event.into()) {
            warn!(item = %event.item, error = %err, "transition event lost, enqueue failed");
        }
        Some(event)
    }
}
