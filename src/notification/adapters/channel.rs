//! Channel-backed dispatcher queue.
//!
//! The production wiring: submissions go onto an unbounded in-process
//! channel and a worker task (see
//! [`crate::notification::services::NotificationWorker`]) drains it. The
//! send is non-blocking, so the write path never waits on delivery work.

use crate::notification::ports::{NotificationJob, NotificationQueue, QueueError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Queue handle backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelQueue {
    sender: UnboundedSender<NotificationJob>,
}

impl ChannelQueue {
    /// Creates a queue and the receiver its worker drains.
    #[must_use]
    pub fn unbounded() -> (Self, UnboundedReceiver<NotificationJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationQueue for ChannelQueue {
    fn submit(&self, job: NotificationJob) -> Result<(), QueueError> {
        self.sender.send(job).map_err(|_| QueueError::Closed)
    }
}
