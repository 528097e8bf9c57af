//! Write-path service for tasks.

use super::{WorkItemLifecycleError, WorkItemLifecycleResult};
use crate::account::domain::UserId;
use crate::notification::ports::{NotificationQueue, WorkItemDirectory};
use crate::notification::services::TransitionDetector;
use crate::workitem::{
    domain::{Priority, Status, StoryId, Task, TaskId, WorkItemRef},
    ports::{TaskRepository, WorkItemRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    story: StoryId,
    description: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    assigned_to: Option<UserId>,
    reporter: Option<UserId>,
    estimated_minutes: Option<u32>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, story: StoryId) -> Self {
        Self {
            title: title.into(),
            story,
            description: None,
            status: None,
            priority: None,
            assigned_to: None,
            reporter: None,
            estimated_minutes: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
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

    /// Sets the effort estimate in whole minutes.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, estimated_minutes: u32) -> Self {
        self.estimated_minutes = Some(estimated_minutes);
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Patch-style request for updating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    assigned_to: Option<Option<UserId>>,
    reporter: Option<Option<UserId>>,
    effort: Option<(Option<u32>, Option<u32>)>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            priority: None,
            assigned_to: None,
            reporter: None,
            effort: None,
            due_date: None,
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

    /// Replaces the effort tracking values.
    #[must_use]
    pub const fn with_effort(
        mut self,
        estimated_minutes: Option<u32>,
        actual_minutes: Option<u32>,
    ) -> Self {
        self.effort = Some((estimated_minutes, actual_minutes));
        self
    }

    /// Replaces (or clears) the due timestamp.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Task write-path orchestration.
#[derive(Clone)]
pub struct TaskService<R, D, Q, C>
where
    R: TaskRepository,
    D: WorkItemDirectory,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    detector: TransitionDetector<D, Q>,
    clock: Arc<C>,
}

impl<R, D, Q, C> TaskService<R, D, Q, C>
where
    R: TaskRepository,
    D: WorkItemDirectory,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    /// Creates a task service.
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

    /// Creates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when validation fails (including
    /// reporter matching the assignee) or the repository rejects the insert.
    pub async fn create(&self, request: CreateTaskRequest) -> WorkItemLifecycleResult<Task> {
        let mut task = Task::new(request.title, request.story, &*self.clock)?;
        if let Some(description) = request.description {
            task = task.with_description(description);
        }
        if let Some(status) = request.status {
            task = task.with_status(status)?;
        }
        if let Some(priority) = request.priority {
            task = task.with_priority(priority);
        }
        task = task
            .with_actors(request.assigned_to, request.reporter)?
            .with_estimated_minutes(request.estimated_minutes)
            .with_due_date(request.due_date);

        let watch = self
            .detector
            .observe_before(WorkItemRef::task(task.id()))
            .await;
        self.repository.store(&task).await?;
        self.detector.observe_after(watch, task.status());
        Ok(task)
    }

    /// Applies a patch to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when the task does not exist,
    /// validation fails, or the repository rejects the update.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> WorkItemLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(WorkItemRepositoryError::NotFound(WorkItemRef::task(id)))?;

        let watch = self.detector.observe_before(WorkItemRef::task(id)).await;

        let clock = &*self.clock;
        if let Some(title) = request.title {
            task.set_title(title, clock)?;
        }
        if let Some(description) = request.description {
            task.set_description(description, clock);
        }
        if let Some(status) = request.status {
            task.set_status(status, clock)?;
        }
        if let Some(priority) = request.priority {
            task.set_priority(priority, clock);
        }
        if let Some(assigned_to) = request.assigned_to {
            task.assign(assigned_to, clock)?;
        }
        if let Some(reporter) = request.reporter {
            task.set_reporter(reporter, clock)?;
        }
        if let Some((estimated_minutes, actual_minutes)) = request.effort {
            task.set_effort(estimated_minutes, actual_minutes, clock);
        }
        if let Some(due_date) = request.due_date {
            task.set_due_date(due_date, clock);
        }

        self.repository.update(&task).await?;
        self.detector.observe_after(watch, task.status());
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> WorkItemLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Deletes a task.
    ///
    /// Deletion emits no notification.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when the task does not exist or
    /// the delete fails.
    pub async fn delete(&self, id: TaskId) -> WorkItemLifecycleResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}
