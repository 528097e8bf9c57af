//! Task aggregate root.

use super::validate::{ensure_distinct_actors, normalized_title};
use super::{Priority, Status, StoryId, TaskId, WorkItemDomainError, WorkItemKind};
use crate::account::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Lowest-level work item belonging to a user story.
///
/// Tasks carry a timestamped due date and effort tracking in whole minutes,
/// and are the only kind that can be [`Status::Blocked`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    story: StoryId,
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    assigned_to: Option<UserId>,
    reporter: Option<UserId>,
    estimated_minutes: Option<u32>,
    actual_minutes: Option<u32>,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted parent story reference.
    pub story: StoryId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: Status,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted assignee reference, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted reporter reference, if any.
    pub reporter: Option<UserId>,
    /// Persisted effort estimate in minutes, if any.
    pub estimated_minutes: Option<u32>,
    /// Persisted recorded effort in minutes, if any.
    pub actual_minutes: Option<u32>,
    /// Persisted due timestamp, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task under the given user story.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        story: StoryId,
        clock: &impl Clock,
    ) -> Result<Self, WorkItemDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            story,
            title: normalized_title(WorkItemKind::Task, title)?,
            description: String::new(),
            status: Status::Todo,
            priority: Priority::default(),
            assigned_to: None,
            reporter: None,
            estimated_minutes: None,
            actual_minutes: None,
            due_date: None,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            story: data.story,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            reporter: data.reporter,
            estimated_minutes: data.estimated_minutes,
            actual_minutes: data.actual_minutes,
            due_date: data.due_date,
            completed_at: data.completed_at,
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
    /// outside the task set. (The task set admits every status, including
    /// [`Status::Blocked`]; the check keeps creation uniform across kinds.)
    pub fn with_status(mut self, status: Status) -> Result<Self, WorkItemDomainError> {
        if !WorkItemKind::Task.allows(status) {
            return Err(WorkItemDomainError::StatusNotAllowed {
                kind: WorkItemKind::Task,
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
        ensure_distinct_actors(WorkItemKind::Task, assigned_to, reporter)?;
        self.assigned_to = assigned_to;
        self.reporter = reporter;
        Ok(self)
    }

    /// Sets the due timestamp at creation time.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the effort estimate at creation time.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, estimated_minutes: Option<u32>) -> Self {
        self.estimated_minutes = estimated_minutes;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent story reference.
    #[must_use]
    pub const fn story(&self) -> StoryId {
        self.story
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

    /// Returns the effort estimate in minutes, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<u32> {
        self.estimated_minutes
    }

    /// Returns the recorded effort in minutes, if any.
    #[must_use]
    pub const fn actual_minutes(&self) -> Option<u32> {
        self.actual_minutes
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
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

    /// Returns whether the task is past its due date and not yet done.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date
            .is_some_and(|due| self.status != Status::Done && now > due)
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
        self.title = normalized_title(WorkItemKind::Task, title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Moves the task to a new status.
    ///
    /// Entering [`Status::Done`] stamps `completed_at`; leaving it clears
    /// the stamp.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::StatusNotAllowed`] when the status is
    /// outside the task set.
    pub fn set_status(
        &mut self,
        status: Status,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        if !WorkItemKind::Task.allows(status) {
            return Err(WorkItemDomainError::StatusNotAllowed {
                kind: WorkItemKind::Task,
                status,
            });
        }
        self.status = status;
        self.completed_at = if status == Status::Done {
            Some(clock.utc())
        } else {
            None
        };
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
        ensure_distinct_actors(WorkItemKind::Task, assigned_to, self.reporter)?;
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
        ensure_distinct_actors(WorkItemKind::Task, self.assigned_to, reporter)?;
        self.reporter = reporter;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the effort tracking values.
    pub fn set_effort(
        &mut self,
        estimated_minutes: Option<u32>,
        actual_minutes: Option<u32>,
        clock: &impl Clock,
    ) {
        self.estimated_minutes = estimated_minutes;
        self.actual_minutes = actual_minutes;
        self.touch(clock);
    }

    /// Replaces the due timestamp.
    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>, clock: &impl Clock) {
        self.due_date = due_date;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
