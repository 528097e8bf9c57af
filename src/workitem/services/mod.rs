//! Application services for the work-item write path and projections.
//!
//! Every create and update flows through a service here, which is what
//! brackets the persist with the transition detector's before/after hooks.

mod epic;
mod stats;
mod story;
mod task;

use crate::workitem::domain::WorkItemDomainError;
use crate::workitem::ports::WorkItemRepositoryError;
use thiserror::Error;

pub use epic::{CreateEpicRequest, EpicService, UpdateEpicRequest};
pub use stats::StatsService;
pub use story::{CreateStoryRequest, StoryService, UpdateStoryRequest};
pub use task::{CreateTaskRequest, TaskService, UpdateTaskRequest};

/// Service-level errors for work-item write operations.
#[derive(Debug, Error)]
pub enum WorkItemLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkItemDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkItemRepositoryError),
}

/// Result type for work-item write operations.
pub type WorkItemLifecycleResult<T> = Result<T, WorkItemLifecycleError>;
