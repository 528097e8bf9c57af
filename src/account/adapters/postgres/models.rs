//! Diesel row models for account persistence.

use super::schema::users;
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Unique username.
    pub username: String,
    /// Optional contact email address.
    pub email: Option<String>,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Unique username.
    pub username: String,
    /// Optional contact email address.
    pub email: Option<String>,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}
