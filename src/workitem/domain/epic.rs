//! Epic aggregate root.

use super::validate::normalized_title;
use super::{EpicId, Priority, Status, WorkItemDomainError, WorkItemKind};
use crate::account::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Top-level work item grouping user stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    id: EpicId,
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    owner: UserId,
    reporter: Option<UserId>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEpicData {
    /// Persisted identifier.
    pub id: EpicId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: Status,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted owner reference.
    pub owner: UserId,
    /// Persisted reporter reference, if any.
    pub reporter: Option<UserId>,
    /// Persisted start date, if any.
    pub start_date: Option<NaiveDate>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Epic {
    /// Creates a new epic owned by the given user.
    ///
    /// Status starts at [`Status::Todo`] and priority at
    /// [`Priority::Medium`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        owner: UserId,
        clock: &impl Clock,
    ) -> Result<Self, WorkItemDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: EpicId::new(),
            title: normalized_title(WorkItemKind::Epic, title)?,
            description: String::new(),
            status: Status::Todo,
            priority: Priority::default(),
            owner,
            reporter: None,
            start_date: None,
            due_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an epic from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEpicData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            owner: data.owner,
            reporter: data.reporter,
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
    /// outside the epic set.
    pub fn with_status(mut self, status: Status) -> Result<Self, WorkItemDomainError> {
        if !WorkItemKind::Epic.allows(status) {
            return Err(WorkItemDomainError::StatusNotAllowed {
                kind: WorkItemKind::Epic,
                status,
            });
        }
        self.status = status;
        Ok(self)
    }

    /// Sets the reporter at creation time.
    ///
    /// Epics carry no owner/reporter distinctness constraint.
    #[must_use]
    pub const fn with_reporter(mut self, reporter: Option<UserId>) -> Self {
        self.reporter = reporter;
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

    /// Returns the epic identifier.
    #[must_use]
    pub const fn id(&self) -> EpicId {
        self.id
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

    /// Returns the owner reference.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the reporter reference, if any.
    #[must_use]
    pub const fn reporter(&self) -> Option<UserId> {
        self.reporter
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
        self.title = normalized_title(WorkItemKind::Epic, title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Moves the epic to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemDomainError::StatusNotAllowed`] when the status is
    /// outside the epic set.
    pub fn set_status(
        &mut self,
        status: Status,
        clock: &impl Clock,
    ) -> Result<(), WorkItemDomainError> {
        if !WorkItemKind::Epic.allows(status) {
            return Err(WorkItemDomainError::StatusNotAllowed {
                kind: WorkItemKind::Epic,
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

    /// Replaces the reporter reference.
    pub fn set_reporter(&mut self, reporter: Option<UserId>, clock: &impl Clock) {
        self.reporter = reporter;
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
