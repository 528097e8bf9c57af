//! Port contracts for account management.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
