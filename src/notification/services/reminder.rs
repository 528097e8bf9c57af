//! Daily overdue-task reminder scan.

use super::{ScheduledJob, ScheduledJobError};
use crate::notification::ports::{NotificationJob, NotificationQueue};
use crate::workitem::domain::WorkItemRef;
use crate::workitem::ports::{TaskRepository, WorkItemRepositoryError};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Scans for overdue tasks and submits one reminder job per hit.
///
/// The scan only produces dispatcher submissions; composing and sending the
/// reminder mail happens on the worker, through the same handler as
/// status-change notifications. Tasks in a terminal status (done or
/// cancelled) are excluded by the repository query.
#[derive(Clone)]
pub struct OverdueReminderScan<T, Q, C>
where
    T: TaskRepository,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    queue: Arc<Q>,
    clock: Arc<C>,
}

impl<T, Q, C> OverdueReminderScan<T, Q, C>
where
    T: TaskRepository,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    /// Creates a scan over the given repository and queue.
    #[must_use]
    pub const fn new(tasks: Arc<T>, queue: Arc<Q>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            queue,
            clock,
        }
    }

    /// Runs one scan and returns the number of reminders submitted.
    ///
    /// An enqueue failure drops that task's reminder (logged) without
    /// aborting the rest of the scan; the next daily run picks the task up
    /// again if it is still overdue.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError`] when the overdue query itself
    /// fails.
    pub async fn scan(&self) -> Result<usize, WorkItemRepositoryError> {
        let now = self.clock.utc();
        let overdue = self.tasks.find_overdue(now).await?;
        let mut submitted = 0;
        for task in overdue {
            let item = WorkItemRef::task(task.id());
            match self.queue.submit(NotificationJob::OverdueReminder { item }) {
                Ok(()) => submitted += 1,
                Err(err) => warn!(%item, error = %err, "overdue reminder lost, enqueue failed"),
            }
        }
        Ok(submitted)
    }
}

#[async_trait]
impl<T, Q, C> ScheduledJob for OverdueReminderScan<T, Q, C>
where
    T: TaskRepository,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    async fn run(&self) -> Result<(), ScheduledJobError> {
        let submitted = self.scan().await.map_err(ScheduledJobError::new)?;
        info!(submitted, "overdue reminder scan finished");
        Ok(())
    }
}
