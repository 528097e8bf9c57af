//! Deterministic in-process adapters for tests.
//!
//! The production queue hands jobs to a worker task; tests instead record
//! submissions with [`RecordingQueue`] and run the handler on drained jobs
//! themselves, which keeps execution order deterministic.

use crate::notification::domain::MailMessage;
use crate::notification::ports::{
    MailTransport, MailTransportError, MailTransportResult, NotificationJob, NotificationQueue,
    QueueError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

fn poisoned(err: impl std::fmt::Display) -> MailTransportError {
    MailTransportError::transport(std::io::Error::other(err.to_string()))
}

/// Mail transport that records sent messages instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailTransport {
    sent: Arc<Mutex<Vec<MailMessage>>>,
    rejection: Arc<Mutex<Option<String>>>,
}

impl RecordingMailTransport {
    /// Creates an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail with the given reason.
    pub fn reject_with(&self, reason: impl Into<String>) {
        if let Ok(mut slot) = self.rejection.lock() {
            *slot = Some(reason.into());
        }
    }

    /// Returns a copy of everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, message: &MailMessage) -> MailTransportResult<()> {
        let rejection = self.rejection.lock().map_err(poisoned)?.clone();
        if let Some(reason) = rejection {
            return Err(MailTransportError::Rejected(reason));
        }
        self.sent.lock().map_err(poisoned)?.push(message.clone());
        Ok(())
    }
}

/// Queue that records submissions for later inspection or manual draining.
#[derive(Debug, Clone, Default)]
pub struct RecordingQueue {
    jobs: Arc<Mutex<Vec<NotificationJob>>>,
    closed: Arc<AtomicBool>,
}

impl RecordingQueue {
    /// Creates an empty recording queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent submission fail as if the queue shut down.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Returns and clears all recorded jobs.
    #[must_use]
    pub fn drain(&self) -> Vec<NotificationJob> {
        self.jobs
            .lock()
            .map(|mut jobs| std::mem::take(&mut *jobs))
            .unwrap_or_default()
    }

    /// Returns a copy of the recorded jobs without clearing them.
    #[must_use]
    pub fn submitted(&self) -> Vec<NotificationJob> {
        self.jobs
            .lock()
            .map(|jobs| jobs.clone())
            .unwrap_or_default()
    }
}

impl NotificationQueue for RecordingQueue {
    fn submit(&self, job: NotificationJob) -> Result<(), QueueError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(QueueError::Closed);
        }
        self.jobs
            .lock()
            .map_err(|err| QueueError::backend(std::io::Error::other(err.to_string())))?
            .push(job);
        Ok(())
    }
}
