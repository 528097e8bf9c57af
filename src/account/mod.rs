//! User accounts for work-item ownership and notification delivery.
//!
//! The account module owns the `User` aggregate and the validated email
//! address type consumed by the notification pipeline. It follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
