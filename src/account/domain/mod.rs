//! Domain model for user accounts.
//!
//! Users are referenced by work items as owners, assignees, and reporters.
//! Only the identity and contact surface needed by the tracking core lives
//! here; credential and session management stay outside this crate.

mod email;
mod error;
mod ids;
mod user;

pub use email::EmailAddress;
pub use error::AccountDomainError;
pub use ids::UserId;
pub use user::User;
