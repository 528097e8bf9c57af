//! Error types for account domain validation.

use thiserror::Error;

/// Errors returned while constructing account domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The email address does not parse as `local@domain`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}
