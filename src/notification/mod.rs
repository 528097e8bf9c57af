//! Status-change notification pipeline.
//!
//! The pipeline observes every work-item write, emits a transition event
//! when the status field changed, and performs the email side effect on a
//! worker decoupled from the write path. A daily reminder job feeds the same
//! dispatcher with overdue-task reminders. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
