//! In-memory repository for user accounts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    username_index: HashMap<String, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().to_owned(),
            ));
        }

        state
            .username_index
            .insert(user.username().to_owned(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }
}
