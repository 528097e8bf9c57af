//! Write-path service for user stories.

use super::{WorkItemLifecycleError, WorkItemLifecycleResult};
use crate::account::domain::UserId;
use crate::notification::ports::{NotificationQueue, WorkItemDirectory};
use crate::notification::services::TransitionDetector;
use crate::workitem::{
    domain::{EpicId, Priority, Status, StoryId, UserStory, WorkItemRef},
    ports::{StoryRepository, WorkItemRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a user story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryRequest {
    title: String,
    epic: EpicId,
    description: Option<String>,
    agile_format: Option<(String, String, String)>,
    status: Option<Status>,
    priority: Option<Priority>,
    assigned_to: Option<UserId>,
    reporter: Option<UserId>,
    story_points: Option<u16>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
}

impl CreateStoryRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, epic: EpicId) -> Self {
        Self {
            title: title.into(),
            epic,
            description: None,
            agile_format: None,
            status: None,
            priority: None,
            assigned_to: None,
            reporter: None,
            story_points: None,
            start_date: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the agile formulation fragments.
    #[must_use]
    pub fn with_agile_format(
        mut self,
        as_a: impl Into<String>,
        i_want: impl Into<String>,
        so_that: impl Into<String>,
    ) -> Self {
        self.agile_format = Some((as_a.into(), i_want.into(), so_that.into()));
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the assignee and reporter.
    #[must_use]
    pub const fn with_actors(
        mut self,
        assigned_to: Option<UserId>,
        reporter: Option<UserId>,
    ) -> Self {
        self.assigned_to = assigned_to;
        self.reporter = reporter;
        self
    }

    /// Sets the story-point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: u16) -> Self {
        self.story_points = Some(story_points);
        self
    }

    /// Sets the planning window.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        start_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        self.start_date = start_date;
        self.due_date = due_date;
        self
    }
}

/// Patch-style request for updating a user story.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStoryRequest {
    title: Option<String>,
    description: Option<String>,
    agile_format: Option<(String, String, String)>,
    status: Option<Status>,
    priority: Option<Priority>,
    assigned_to: Option<Option<UserId>>,
    reporter: Option<Option<UserId>>,
    story_points: Option<Option<u16>>,
    schedule: Option<(Option<NaiveDate>, Option<NaiveDate>)>,
}

impl UpdateStoryRequest {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            agile_format: None,
            status: None,
            priority: None,
            assigned_to: None,
            reporter: None,
            story_points: None,
            schedule: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the agile formulation fragments.
    #[must_use]
    pub fn with_agile_format(
        mut self,
        as_a: impl Into<String>,
        i_want: impl Into<String>,
        so_that: impl Into<String>,
    ) -> Self {
        self.agile_format = Some((as_a.into(), i_want.into(), so_that.into()));
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces (or clears) the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assigned_to: Option<UserId>) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    /// Replaces (or clears) the reporter.
    #[must_use]
    pub const fn with_reporter(mut self, reporter: Option<UserId>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Replaces (or clears) the story-point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: Option<u16>) -> Self {
        self.story_points = Some(story_points);
        self
    }

    /// Replaces the planning window.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        start_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        self.schedule = Some((start_date, due_date));
        self
    }
}

/// User-story write-path orchestration.
#[derive(Clone)]
pub struct StoryService<R, D, Q, C>
where
    R: StoryRepository,
    D: WorkItemDirectory,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    detector: TransitionDetector<D, Q>,
    clock: Arc<C>,
}

impl<R, D, Q, C> StoryService<R, D, Q, C>
where
    R: StoryRepository,
    D: WorkItemDirectory,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    /// Creates a story service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        detector: TransitionDetector<D, Q>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            detector,
            clock,
        }
    }

    /// Creates and stores a new user story.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when validation fails (including
    /// reporter matching the assignee) or the repository rejects the insert.
    pub async fn create(&self, request: CreateStoryRequest) -> WorkItemLifecycleResult<UserStory> {
        let mut story = UserStory::new(request.title, request.epic, &*self.clock)?;
        if let Some(description) = request.description {
            story = story.with_description(description);
        }
        if let Some((as_a, i_want, so_that)) = request.agile_format {
            story = story.with_agile_format(as_a, i_want, so_that);
        }
        if let Some(status) = request.status {
            story = story.with_status(status)?;
        }
        if let Some(priority) = request.priority {
            story = story.with_priority(priority);
        }
        story = story
            .with_actors(request.assigned_to, request.reporter)?
            .with_story_points(request.story_points)
            .with_schedule(request.start_date, request.due_date);

        let watch = self
            .detector
            .observe_before(WorkItemRef::story(story.id()))
            .await;
        self.repository.store(&story).await?;
        self.detector.observe_after(watch, story.status());
        Ok(story)
    }

    /// Applies a patch to an existing user story.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when the story does not exist,
    /// validation fails, or the repository rejects the update.
    pub async fn update(
        &self,
        id: StoryId,
        request: UpdateStoryRequest,
    ) -> WorkItemLifecycleResult<UserStory> {
        let mut story = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(WorkItemRepositoryError::NotFound(WorkItemRef::story(id)))?;

        let watch = self.detector.observe_before(WorkItemRef::story(id)).await;

        let clock = &*self.clock;
        if let Some(title) = request.title {
            story.set_title(title, clock)?;
        }
        if let Some(description) = request.description {
            story.set_description(description, clock);
        }
        if let Some((as_a, i_want, so_that)) = request.agile_format {
            story.set_agile_format(as_a, i_want, so_that, clock);
        }
        if let Some(status) = request.status {
            story.set_status(status, clock)?;
        }
        if let Some(priority) = request.priority {
            story.set_priority(priority, clock);
        }
        if let Some(assigned_to) = request.assigned_to {
            story.assign(assigned_to, clock)?;
        }
        if let Some(reporter) = request.reporter {
            story.set_reporter(reporter, clock)?;
        }
        if let Some(story_points) = request.story_points {
            story.set_story_points(story_points, clock);
        }
        if let Some((start_date, due_date)) = request.schedule {
            story.set_schedule(start_date, due_date, clock);
        }

        self.repository.update(&story).await?;
        self.detector.observe_after(watch, story.status());
        Ok(story)
    }

    /// Retrieves a user story by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: StoryId) -> WorkItemLifecycleResult<Option<UserStory>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Deletes a user story, cascading to its tasks.
    ///
    /// Deletion emits no notification.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when the story does not exist or
    /// the delete fails.
    pub async fn delete(&self, id: StoryId) -> WorkItemLifecycleResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}
