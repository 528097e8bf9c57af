//! Unit tests for the in-memory user repository.

use crate::account::adapters::memory::InMemoryUserRepository;
use crate::account::domain::{User, UserId};
use crate::account::ports::{UserRepository, UserRepositoryError};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn store_then_find_round_trips() -> eyre::Result<()> {
    let repository = InMemoryUserRepository::new();
    let user = User::new("ada")?;

    repository.store(&user).await?;
    let found = repository.find_by_id(user.id()).await?;

    ensure!(found == Some(user.clone()));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn find_missing_user_returns_none() -> eyre::Result<()> {
    let repository = InMemoryUserRepository::new();
    let found = repository.find_by_id(UserId::new()).await?;
    ensure!(found.is_none());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn duplicate_username_is_rejected() -> eyre::Result<()> {
    let repository = InMemoryUserRepository::new();
    repository.store(&User::new("ada")?).await?;

    let result = repository.store(&User::new("ada")?).await;
    match result {
        Err(UserRepositoryError::DuplicateUsername(name)) => ensure!(name == "ada"),
        other => bail!("expected duplicate username error, got {other:?}"),
    }
    Ok(())
}
