//! Adapters for the notification pipeline.

pub mod channel;
pub mod directory;
pub mod memory;

pub use channel::ChannelQueue;
pub use directory::RepositoryDirectory;
pub use memory::{RecordingMailTransport, RecordingQueue};
