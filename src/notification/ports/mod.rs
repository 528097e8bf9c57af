//! Port contracts for the notification pipeline.

pub mod directory;
pub mod mail;
pub mod queue;

pub use directory::{DirectoryError, DirectoryResult, WorkItemDirectory};
pub use mail::{MailTransport, MailTransportError, MailTransportResult};
pub use queue::{NotificationJob, NotificationQueue, QueueError};
