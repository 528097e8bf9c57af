//! UserStory aggregate root.

use super::validate::{ensure_distinct_actors, normalized_title};
use super::{EpicId, Priority, Status, StoryId, WorkItemDomainError, WorkItemKind};
use crate::account::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Mid-level work item belonging to an epic.
///
/// Carries the agile formulation fields (`as a …, I want …, so that …`) in
/// addition to the shared observable shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStory {
    id: StoryId,
    epic: EpicId,
    title: String,
    description: String,
    as_a: String,
    i_want: String,
    so_that: String,
    status: Status,
    priority: Priority,
    assigned_to: Option<UserId>,
    reporter: Option<UserId>,
    story_points: Option<u16>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStoryData {
    /// Persisted identifier.
    pub id: StoryId,
    /// Persisted parent epic reference.
    pub epic: EpicId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted "as a" fragment.
    pub as_a: String,
    /// Persisted "I want" fragment.
    pub i_want: String,
    /// Persisted "so that" fragment.
    pub so_that: String,
    /// Persisted status.
    pub status: Status,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted assignee reference, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted reporter reference, if any.
    pub reporter: Option<UserId>,
    /// Persisted story-point estimate, if any.
    pub story_points: Option<u16>,
    /// Persisted start date, if any.
    pub start_date: Option<NaiveDate>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserStory {
    /// Creates a new user story under the given epic.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        epic: EpicId,
        clock: &impl Clock,
    ) -> Result<Self, WorkItemDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: StoryId::new(),
            epic,
            title: normalized_title(WorkItemKind::UserStory, title)?,
            description: String::new(),
            as_a: String::new(),
            i_want: String::new(),
            so_that: String::new(),
            status: Status::Todo,
            priority: Priority::default(),
            assigned_to: None,
            reporter: None,
            story_points: None,
            start_date: None,
            due_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a user story from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStoryData) -> Self {
        Self {
            id: data.id,
            epic: data.epic,
            title: data.title,
            description: data.description,
            as_a: data.as_a,
            i_want: data.i_want,
            so_that: data.so_that,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            reporter: data.reporter,
            story_points: data.story_points,
            start_date: data.start_date,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the description at creation time.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the agile formulation at creation time.
    #[must_use]
    pub fn with_agile_format(
        mut self,
        as_a: impl Into<String>,
        i_want: impl Into<String>,
        so_that: impl Into<String>,
    ) -> Self {
        self.as_a = as_a.into();
        self.i_want = i_want.into();
        self.so_that = so_that.into();
        self
    }

    /// Sets the priority at creation time.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial status at creation time.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::StatusNotAllowed`] when the status is
    /// outside the user-story set.
    pub fn with_status(mut self, status: Status) -> Result<Self, WorkItemDomainError> {
        if !WorkItemKind::UserStory.allows(status) {
            return Err(WorkItemDomainError::StatusNotAllowed {
                kind: WorkItemKind::UserStory,
                status,
            });
        }
        self.status = status;
        Ok(self)
    }

    /// Sets the assignee and reporter at creation time.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::ReporterIsPrimaryActor`] when both are
    /// set to the same user.
    pub fn with_actors(
        mut self,
        assigned_to: Option<UserId>,
        reporter: Option<UserId>,
    ) -> Result<Self, WorkItemDomainError> {
        ensure_distinct_actors(WorkItemKind::UserStory, assigned_to, reporter)?;
        self.assigned_to = assigned_to;
        self.reporter = reporter;
        Ok(self)
    }

    /// Sets the story-point estimate at creation time.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: Option<u16>) -> Self {
        self.story_points = story_points;
        self
    }

    /// Sets the planning window at creation time.
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

    /// Returns the story identifier.
    #[must_use]
    pub const fn id(&self) -> StoryId {
        self.id
    }

    /// Returns the parent epic reference.
    #[must_use]
    pub const fn epic(&self) -> EpicId {
        self.epic
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the agile "as a" fragment (possibly empty).
    #[must_use]
    pub fn as_a(&self) -> &str {
        &self.as_a
    }

    /// Returns the agile "I want" fragment (possibly empty).
    #[must_use]
    pub fn i_want(&self) -> &str {
        &self.i_want
    }

    /// Returns the agile "so that" fragment (possibly empty).
    #[must_use]
    pub fn so_that(&self) -> &str {
        &self.so_that
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the reporter reference, if any.
    #[must_use]
    pub const fn reporter(&self) -> Option<UserId> {
        self.reporter
    }

    /// Returns the story-point estimate, if any.
    #[must_use]
    pub const fn story_points(&self) -> Option<u16> {
        self.story_points
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the formatted agile story, falling back to the description
    /// when any fragment is missing.
    #[must_use]
    pub fn full_story(&self) -> String {
        if self.as_a.is_empty() || self.i_want.is_empty() || self.so_that.is_empty() {
            return self.description.clone();
        }
        format!(
            "As a {}, I want {}, so that {}",
            self.as_a, self.i_want, self.so_that
        )
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn set_title(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        self.title = normalized_title(WorkItemKind::UserStory, title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Moves the story to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::StatusNotAllowed`] when the status is
    /// outside the user-story set.
    pub fn set_status(
        &mut self,
        status: Status,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        if !WorkItemKind::UserStory.allows(status) {
            return Err(WorkItemDomainError::StatusNotAllowed {
                kind: WorkItemKind::UserStory,
                status,
            });
        }
        self.status = status;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the priority.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Replaces the assignee reference.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::ReporterIsPrimaryActor`] when the new
    /// assignee matches the current reporter.
    pub fn assign(
        &mut self,
        assigned_to: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        ensure_distinct_actors(WorkItemKind::UserStory, assigned_to, self.reporter)?;
        self.assigned_to = assigned_to;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the reporter reference.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::ReporterIsPrimaryActor`] when the new
    /// reporter matches the current assignee.
    pub fn set_reporter(
        &mut self,
        reporter: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        ensure_distinct_actors(WorkItemKind::UserStory, self.assigned_to, reporter)?;
        self.reporter = reporter;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the agile formulation fragments.
    pub fn set_agile_format(
        &mut self,
        as_a: impl Into<String>,
        i_want: impl Into<String>,
        so_that: impl Into<String>,
        clock: &impl Clock,
    ) {
        self.as_a = as_a.into();
        self.i_want = i_want.into();
        self.so_that = so_that.into();
        self.touch(clock);
    }

    /// Replaces the story-point estimate.
    pub fn set_story_points(&mut self, story_points: Option<u16>, clock: &impl Clock) {
        self.story_points = story_points;
        self.touch(clock);
    }

    /// Replaces the planning window.
    pub fn set_schedule(
        &mut self,
        start_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        clock: &impl Clock,
    ) {
        self.start_date = start_date;
        self.due_date = due_date;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
