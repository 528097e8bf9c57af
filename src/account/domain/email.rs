//! Validated email address type.

use super::AccountDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized, validated email address.
///
/// Validation is deliberately shallow: a trimmed, non-empty value with
/// exactly one `@` separating non-empty local and domain parts. Deliverability
/// is the mail transport's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidEmail`] when the value is empty
    /// or does not split into `local@domain` with both parts non-empty.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && !has_more_parts
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(AccountDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
