//! User aggregate.

use super::{AccountDomainError, EmailAddress, UserId};
use serde::{Deserialize, Serialize};

/// User account referenced by work items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: Option<EmailAddress>,
    first_name: String,
    last_name: String,
}

impl User {
    /// Creates a user with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyUsername`] when the username is
    /// empty after trimming.
    pub fn new(username: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = username.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(AccountDomainError::EmptyUsername);
        }

        Ok(Self {
            id: UserId::new(),
            username: normalized.to_owned(),
            email: None,
            first_name: String::new(),
            last_name: String::new(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: UserId,
        username: String,
        email: Option<EmailAddress>,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            id,
            username,
            email,
            first_name,
            last_name,
        }
    }

    /// Sets the contact email address.
    #[must_use]
    pub fn with_email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the contact email address, if any.
    #[must_use]
    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Returns the first name (possibly empty).
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name (possibly empty).
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}
