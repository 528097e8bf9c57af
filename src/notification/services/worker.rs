//! Worker task draining the dispatcher queue.

use super::Notifier;
use crate::account::ports::UserRepository;
use crate::notification::ports::{MailTransport, NotificationJob, WorkItemDirectory};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::info;

/// Spawner for the queue-draining worker task.
///
/// The worker runs each job to its terminal outcome and logs the
/// human-readable outcome string. The handler never returns an error, so a
/// poisoned job cannot kill the worker; at-least-once redelivery by a
/// durable queue would simply run the handler again.
pub struct NotificationWorker;

impl NotificationWorker {
    /// Spawns a worker draining the given receiver until the queue closes.
    pub fn spawn<D, U, M>(
        notifier: Arc<Notifier<D, U, M>>,
        mut receiver: UnboundedReceiver<NotificationJob>,
    ) -> JoinHandle<()>
    where
        D: WorkItemDirectory + 'static,
        U: UserRepository + 'static,
        M: MailTransport + 'static,
    {
        tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                let outcome = notifier.handle(job).await;
                info!(%outcome, "notification job finished");
            }
        })
    }
}
