//! Repository port for user persistence and lookup.

use crate::account::domain::{User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the user ID
    /// already exists or [`UserRepositoryError::DuplicateUsername`] when the
    /// username is taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
