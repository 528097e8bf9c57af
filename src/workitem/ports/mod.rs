//! Port contracts for work-item persistence.

pub mod repository;

pub use repository::{
    EpicRepository, StoryRepository, TaskRepository, WorkItemRepositoryError,
    WorkItemRepositoryResult,
};
