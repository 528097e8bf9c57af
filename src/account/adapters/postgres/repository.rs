//! `PostgreSQL` repository implementation for account storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::account::{
    domain::{EmailAddress, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by account adapters.
pub type AccountPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: AccountPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AccountPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let username = user.username().to_owned();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some("users_username_key") =>
                    {
                        UserRepositoryError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        username: user.username().to_owned(),
        email: user.email().map(|email| email.as_str().to_owned()),
        first_name: user.first_name().to_owned(),
        last_name: user.last_name().to_owned(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        username,
        email,
        first_name,
        last_name,
    } = row;

    let email = email
        .map(EmailAddress::new)
        .transpose()
        .map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(
        UserId::from_uuid(id),
        username,
        email,
        first_name,
        last_name,
    ))
}
