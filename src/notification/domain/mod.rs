//! Domain model for the notification pipeline.

mod event;
mod message;
mod outcome;
mod recipients;
mod snapshot;

pub use event::TransitionEvent;
pub use message::{MailMessage, MailTemplates, MessageRenderError};
pub use outcome::DeliveryOutcome;
pub use recipients::resolve_recipients;
pub use snapshot::WorkItemSnapshot;
