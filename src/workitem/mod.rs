//! Work-item hierarchy: Epic → UserStory → Task.
//!
//! This module owns the three-level work-item domain, its repositories, and
//! the write-path services that every create/update/delete flows through.
//! The write path is where the notification pipeline hooks in: services
//! capture the pre-write status and publish a transition event after the
//! write when the status changed. The module follows hexagonal architecture:
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
