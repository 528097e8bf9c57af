//! Diesel row models for work-item persistence.

use super::schema::{epics, tasks, user_stories};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for epic records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(treat_none_as_null = true)]
#[diesel(table_name = epics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EpicRow {
    /// Epic identifier.
    pub id: uuid::Uuid,
    /// Epic title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Optional reporting user.
    pub reporter_id: Option<uuid::Uuid>,
    /// Optional planned start date.
    pub start_date: Option<NaiveDate>,
    /// Optional planned due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for user-story records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(treat_none_as_null = true)]
#[diesel(table_name = user_stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoryRow {
    /// Story identifier.
    pub id: uuid::Uuid,
    /// Parent epic.
    pub epic_id: uuid::Uuid,
    /// Story title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Agile "as a" fragment.
    pub as_a: String,
    /// Agile "I want" fragment.
    pub i_want: String,
    /// Agile "so that" fragment.
    pub so_that: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Optional assigned user.
    pub assigned_to_id: Option<uuid::Uuid>,
    /// Optional reporting user.
    pub reporter_id: Option<uuid::Uuid>,
    /// Optional story-point estimate.
    pub story_points: Option<i16>,
    /// Optional planned start date.
    pub start_date: Option<NaiveDate>,
    /// Optional planned due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(treat_none_as_null = true)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Parent story.
    pub story_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Optional assigned user.
    pub assigned_to_id: Option<uuid::Uuid>,
    /// Optional reporting user.
    pub reporter_id: Option<uuid::Uuid>,
    /// Optional effort estimate in whole minutes.
    pub estimated_minutes: Option<i32>,
    /// Optional recorded effort in whole minutes.
    pub actual_minutes: Option<i32>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
