//! Mail transport port.

use crate::notification::domain::MailMessage;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mail transport operations.
pub type MailTransportResult<T> = Result<T, MailTransportError>;

/// Outbound mail contract.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers one message to all its recipients.
    ///
    /// # Errors
    ///
    /// Returns [`MailTransportError`] when the message was rejected or the
    /// transport was unreachable. Callers at the dispatcher boundary catch
    /// this and record it as a failure outcome; it never propagates further.
    async fn send(&self, message: &MailMessage) -> MailTransportResult<()>;
}

/// Errors returned by mail transport adapters.
#[derive(Debug, Clone, Error)]
pub enum MailTransportError {
    /// The transport rejected the message.
    #[error("message rejected: {0}")]
    Rejected(String),

    /// Transport-layer failure.
    #[error("mail transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailTransportError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
