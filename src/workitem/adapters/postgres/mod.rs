//! `PostgreSQL` adapters for work-item persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresWorkItemRepository, WorkItemPgPool};
