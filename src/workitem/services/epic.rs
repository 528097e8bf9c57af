//! Write-path service for epics.

use super::{WorkItemLifecycleError, WorkItemLifecycleResult};
use crate::account::domain::UserId;
use crate::notification::ports::{NotificationQueue, WorkItemDirectory};
use crate::notification::services::TransitionDetector;
use crate::workitem::{
    domain::{Epic, EpicId, Priority, Status, WorkItemRef},
    ports::{EpicRepository, WorkItemRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating an epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEpicRequest {
    title: String,
    owner: UserId,
    description: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    reporter: Option<UserId>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
}

impl CreateEpicRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, owner: UserId) -> Self {
        Self {
            title: title.into(),
            owner,
            description: None,
            status: None,
            priority: None,
            reporter: None,
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

    /// Sets the reporter.
    #[must_use]
    pub const fn with_reporter(mut self, reporter: UserId) -> Self {
        self.reporter = Some(reporter);
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

/// Patch-style request for updating an epic.
///
/// Unset fields leave the stored value untouched; `reporter` and `schedule`
/// carry nested options so callers can clear them explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEpicRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    reporter: Option<Option<UserId>>,
    schedule: Option<(Option<NaiveDate>, Option<NaiveDate>)>,
}

impl UpdateEpicRequest {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            priority: None,
            reporter: None,
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

    /// Replaces (or clears) the reporter.
    #[must_use]
    pub const fn with_reporter(mut self, reporter: Option<UserId>) -> Self {
        self.reporter = Some(reporter);
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

/// Epic write-path orchestration.
#[derive(Clone)]
pub struct EpicService<R, D, Q, C>
where
    R: EpicRepository,
    D: WorkItemDirectory,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    detector: TransitionDetector<D, Q>,
    clock: Arc<C>,
}

impl<R, D, Q, C> EpicService<R, D, Q, C>
where
    R: EpicRepository,
    D: WorkItemDirectory,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    /// Creates an epic service.
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

    /// Creates and stores a new epic.
    ///
    /// The detector brackets the write like any other save; with no prior
    /// state the after-hook never emits an event.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when validation fails or the
    /// repository rejects the insert.
    pub async fn create(&self, request: CreateEpicRequest) -> WorkItemLifecycleResult<Epic> {
        let mut epic = Epic::new(request.title, request.owner, &*self.clock)?;
        if let Some(description) = request.description {
            epic = epic.with_description(description);
        }
        if let Some(status) = request.status {
            epic = epic.with_status(status)?;
        }
        if let Some(priority) = request.priority {
            epic = epic.with_priority(priority);
        }
        epic = epic
            .with_reporter(request.reporter)
            .with_schedule(request.start_date, request.due_date);

        let watch = self
            .detector
            .observe_before(WorkItemRef::epic(epic.id()))
            .await;
        self.repository.store(&epic).await?;
        self.detector.observe_after(watch, epic.status());
        Ok(epic)
    }

    /// Applies a patch to an existing epic.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when the epic does not exist,
    /// validation fails, or the repository rejects the update.
    pub async fn update(
        &self,
        id: EpicId,
        request: UpdateEpicRequest,
    ) -> WorkItemLifecycleResult<Epic> {
        let mut epic = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(WorkItemRepositoryError::NotFound(WorkItemRef::epic(id)))?;

        let watch = self.detector.observe_before(WorkItemRef::epic(id)).await;

        let clock = &*self.clock;
        if let Some(title) = request.title {
            epic.set_title(title, clock)?;
        }
        if let Some(description) = request.description {
            epic.set_description(description, clock);
        }
        if let Some(status) = request.status {
            epic.set_status(status, clock)?;
        }
        if let Some(priority) = request.priority {
            epic.set_priority(priority, clock);
        }
        if let Some(reporter) = request.reporter {
            epic.set_reporter(reporter, clock);
        }
        if let Some((start_date, due_date)) = request.schedule {
            epic.set_schedule(start_date, due_date, clock);
        }

        self.repository.update(&epic).await?;
        self.detector.observe_after(watch, epic.status());
        Ok(epic)
    }

    /// Retrieves an epic by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: EpicId) -> WorkItemLifecycleResult<Option<Epic>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Deletes an epic, cascading to its stories and their tasks.
    ///
    /// Deletion emits no notification.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemLifecycleError`] when the epic does not exist or
    /// the delete fails.
    pub async fn delete(&self, id: EpicId) -> WorkItemLifecycleResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}
