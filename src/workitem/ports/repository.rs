//! Repository ports for the work-item hierarchy.
//!
//! The three repositories share one error type: every operation addresses
//! items through kind-tagged references, and the write path treats lookup
//! and persistence failures uniformly across kinds.

use crate::workitem::domain::{Epic, EpicId, StoryId, Task, TaskId, UserStory, WorkItemRef};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for work-item repository operations.
pub type WorkItemRepositoryResult<T> = Result<T, WorkItemRepositoryError>;

/// Epic persistence contract.
#[async_trait]
pub trait EpicRepository: Send + Sync {
    /// Stores a new epic.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, epic: &Epic) -> WorkItemRepositoryResult<()>;

    /// Persists changes to an existing epic.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the epic does not
    /// exist.
    async fn update(&self, epic: &Epic) -> WorkItemRepositoryResult<()>;

    /// Finds an epic by identifier.
    ///
    /// Returns `None` when the epic does not exist.
    async fn find_by_id(&self, id: EpicId) -> WorkItemRepositoryResult<Option<Epic>>;

    /// Deletes an epic and cascades to its stories and their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the epic does not
    /// exist.
    async fn delete(&self, id: EpicId) -> WorkItemRepositoryResult<()>;
}

/// User-story persistence contract.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Stores a new user story.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::Duplicate`] when the identifier
    /// already exists or [`WorkItemRepositoryError::MissingParent`] when the
    /// parent epic is absent.
    async fn store(&self, story: &UserStory) -> WorkItemRepositoryResult<()>;

    /// Persists changes to an existing user story.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the story does not
    /// exist.
    async fn update(&self, story: &UserStory) -> WorkItemRepositoryResult<()>;

    /// Finds a user story by identifier.
    ///
    /// Returns `None` when the story does not exist.
    async fn find_by_id(&self, id: StoryId) -> WorkItemRepositoryResult<Option<UserStory>>;

    /// Returns all stories under the given epic.
    async fn find_by_epic(&self, epic: EpicId) -> WorkItemRepositoryResult<Vec<UserStory>>;

    /// Deletes a user story and cascades to its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the story does not
    /// exist.
    async fn delete(&self, id: StoryId) -> WorkItemRepositoryResult<()>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::Duplicate`] when the identifier
    /// already exists or [`WorkItemRepositoryError::MissingParent`] when the
    /// parent story is absent.
    async fn store(&self, task: &Task) -> WorkItemRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> WorkItemRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> WorkItemRepositoryResult<Option<Task>>;

    /// Returns all tasks under the given user story.
    async fn find_by_story(&self, story: StoryId) -> WorkItemRepositoryResult<Vec<Task>>;

    /// Returns tasks whose due date lies strictly before `now` and whose
    /// status is not terminal.
    async fn find_overdue(&self, now: DateTime<Utc>) -> WorkItemRepositoryResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> WorkItemRepositoryResult<()>;
}

/// Errors returned by work-item repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkItemRepositoryError {
    /// An item with the same identifier already exists.
    #[error("duplicate {0}")]
    Duplicate(WorkItemRef),

    /// The item was not found.
    #[error("{0} not found")]
    NotFound(WorkItemRef),

    /// The referenced parent item is absent.
    #[error("missing parent {0}")]
    MissingParent(WorkItemRef),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkItemRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
