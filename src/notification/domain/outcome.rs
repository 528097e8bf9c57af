//! Terminal outcomes of one dispatcher handler attempt.

use crate::account::domain::EmailAddress;
use crate::workitem::domain::WorkItemRef;
use std::fmt;

/// What happened when the handler ran a notification job.
///
/// Every variant is terminal for the attempt: delivery failures are recorded
/// here instead of propagating to the queue's retry machinery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Mail was handed to the transport for the listed recipients.
    Sent {
        /// Addresses the mail went to.
        recipients: Vec<EmailAddress>,
    },
    /// Nobody to notify; nothing was sent.
    NoRecipients,
    /// The item vanished between submission and execution; nothing was sent.
    NotFound {
        /// The missing item.
        item: WorkItemRef,
    },
    /// The transport rejected the mail or was unreachable.
    SendFailure {
        /// Human-readable failure description.
        reason: String,
    },
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent { recipients } => {
                let joined = recipients
                    .iter()
                    .map(EmailAddress::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "email sent successfully to {joined}")
            }
            Self::NoRecipients => f.write_str("no recipients with valid email addresses"),
            Self::NotFound { item } => write!(f, "{item} not found"),
            Self::SendFailure { reason } => write!(f, "failed to send email: {reason}"),
        }
    }
}
