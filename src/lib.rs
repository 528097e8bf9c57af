//! Backlog: project-tracking backend core.
//!
//! This crate provides the domain and service layer for a three-level
//! work-item hierarchy (Epic → UserStory → Task) with asynchronous email
//! notifications on status change and a daily overdue-reminder job. The API
//! layer consuming it lives outside this crate; the core has no HTTP
//! surface of its own.
//!
//! # Architecture
//!
//! Backlog follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, queue)
//!
//! # Modules
//!
//! - [`account`]: Users and validated email addresses
//! - [`workitem`]: Work-item hierarchy, repositories, and write-path services
//! - [`notification`]: Transition detection, dispatch, and scheduling

pub mod account;
pub mod notification;
pub mod workitem;
