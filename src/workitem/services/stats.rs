//! Completion and status-breakdown projections.

use crate::workitem::{
    domain::{CompletionStats, EpicId, StatusBreakdown, StoryId, Task, UserStory},
    ports::{StoryRepository, TaskRepository, WorkItemRepositoryError},
};
use std::sync::Arc;

/// Read-side statistics over the work-item hierarchy.
///
/// Pure projections of repository listings; nothing here mutates state or
/// feeds the notification pipeline.
#[derive(Clone)]
pub struct StatsService<S, T>
where
    S: StoryRepository,
    T: TaskRepository,
{
    stories: Arc<S>,
    tasks: Arc<T>,
}

impl<S, T> StatsService<S, T>
where
    S: StoryRepository,
    T: TaskRepository,
{
    /// Creates a statistics service.
    #[must_use]
    pub const fn new(stories: Arc<S>, tasks: Arc<T>) -> Self {
        Self { stories, tasks }
    }

    /// Completion of an epic, measured over its user stories.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError`] when the listing fails.
    pub async fn epic_completion(
        &self,
        epic: EpicId,
    ) -> Result<CompletionStats, WorkItemRepositoryError> {
        let stories = self.stories.find_by_epic(epic).await?;
        Ok(CompletionStats::from_statuses(
            stories.iter().map(UserStory::status),
        ))
    }

    /// Completion of a user story, measured over its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError`] when the listing fails.
    pub async fn story_completion(
        &self,
        story: StoryId,
    ) -> Result<CompletionStats, WorkItemRepositoryError> {
        let tasks = self.tasks.find_by_story(story).await?;
        Ok(CompletionStats::from_statuses(tasks.iter().map(Task::status)))
    }

    /// Per-status counts for the stories under an epic.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError`] when the listing fails.
    pub async fn epic_breakdown(
        &self,
        epic: EpicId,
    ) -> Result<StatusBreakdown, WorkItemRepositoryError> {
        let stories = self.stories.find_by_epic(epic).await?;
        Ok(StatusBreakdown::from_statuses(
            stories.iter().map(UserStory::status),
        ))
    }

    /// Per-status counts for the tasks under a user story.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError`] when the listing fails.
    pub async fn story_breakdown(
        &self,
        story: StoryId,
    ) -> Result<StatusBreakdown, WorkItemRepositoryError> {
        let tasks = self.tasks.find_by_story(story).await?;
        Ok(StatusBreakdown::from_statuses(tasks.iter().map(Task::status)))
    }
}
