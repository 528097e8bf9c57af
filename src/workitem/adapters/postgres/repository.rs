//! `PostgreSQL` repository implementation for work-item storage.
//!
//! One repository type serves all three ports; cascade deletes are issued
//! explicitly inside a transaction so the adapter does not depend on
//! `ON DELETE CASCADE` being present in the deployed DDL.

use super::{
    models::{EpicRow, StoryRow, TaskRow},
    schema::{epics, tasks, user_stories},
};
use crate::account::domain::UserId;
use crate::workitem::{
    domain::{
        Epic, EpicId, PersistedEpicData, PersistedStoryData, PersistedTaskData, Priority, Status,
        StoryId, Task, TaskId, UserStory, WorkItemRef,
    },
    ports::{
        EpicRepository, StoryRepository, TaskRepository, WorkItemRepositoryError,
        WorkItemRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by work-item adapters.
pub type WorkItemPgPool = Pool<ConnectionManager<PgConnection>>;

/// Storage representations of the terminal statuses skipped by the overdue
/// scan.
const TERMINAL_STATUSES: [&str; 2] = ["DONE", "CANCELLED"];

/// `PostgreSQL`-backed repository for epics, user stories, and tasks.
#[derive(Debug, Clone)]
pub struct PostgresWorkItemRepository {
    pool: WorkItemPgPool,
}

impl PostgresWorkItemRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkItemPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkItemRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkItemRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkItemRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkItemRepositoryError::persistence)?
    }
}

fn map_insert_error(
    err: DieselError,
    item: WorkItemRef,
    parent: Option<WorkItemRef>,
) -> WorkItemRepositoryError {
    match (err, parent) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
            WorkItemRepositoryError::Duplicate(item)
        }
        (
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _),
            Some(parent_ref),
        ) => WorkItemRepositoryError::MissingParent(parent_ref),
        (other, _) => WorkItemRepositoryError::persistence(other),
    }
}

fn ensure_updated(affected: usize, item: WorkItemRef) -> WorkItemRepositoryResult<()> {
    if affected == 0 {
        return Err(WorkItemRepositoryError::NotFound(item));
    }
    Ok(())
}

#[async_trait]
impl EpicRepository for PostgresWorkItemRepository {
    async fn store(&self, epic: &Epic) -> WorkItemRepositoryResult<()> {
        let row = epic_to_row(epic);
        let item = WorkItemRef::epic(epic.id());
        self.run_blocking(move |connection| {
            diesel::insert_into(epics::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, item, None))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, epic: &Epic) -> WorkItemRepositoryResult<()> {
        let row = epic_to_row(epic);
        let item = WorkItemRef::epic(epic.id());
        self.run_blocking(move |connection| {
            let affected = diesel::update(epics::table.filter(epics::id.eq(row.id)))
                .set(&row)
                .execute(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            ensure_updated(affected, item)
        })
        .await
    }

    async fn find_by_id(&self, id: EpicId) -> WorkItemRepositoryResult<Option<Epic>> {
        self.run_blocking(move |connection| {
            let row = epics::table
                .filter(epics::id.eq(id.into_inner()))
                .select(EpicRow::as_select())
                .first::<EpicRow>(connection)
                .optional()
                .map_err(WorkItemRepositoryError::persistence)?;
            row.map(row_to_epic).transpose()
        })
        .await
    }

    async fn delete(&self, id: EpicId) -> WorkItemRepositoryResult<()> {
        let item = WorkItemRef::epic(id);
        self.run_blocking(move |connection| {
            connection
                .transaction(|conn| {
                    let child_stories = user_stories::table
                        .filter(user_stories::epic_id.eq(id.into_inner()))
                        .select(user_stories::id);
                    diesel::delete(tasks::table.filter(tasks::story_id.eq_any(child_stories)))
                        .execute(conn)?;
                    diesel::delete(
                        user_stories::table.filter(user_stories::epic_id.eq(id.into_inner())),
                    )
                    .execute(conn)?;
                    diesel::delete(epics::table.filter(epics::id.eq(id.into_inner()))).execute(conn)
                })
                .map_err(WorkItemRepositoryError::persistence)
                .and_then(|affected| ensure_updated(affected, item))
        })
        .await
    }
}

#[async_trait]
impl StoryRepository for PostgresWorkItemRepository {
    async fn store(&self, story: &UserStory) -> WorkItemRepositoryResult<()> {
        let row = story_to_row(story)?;
        let item = WorkItemRef::story(story.id());
        let parent = WorkItemRef::epic(story.epic());
        self.run_blocking(move |connection| {
            diesel::insert_into(user_stories::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, item, Some(parent)))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, story: &UserStory) -> WorkItemRepositoryResult<()> {
        let row = story_to_row(story)?;
        let item = WorkItemRef::story(story.id());
        self.run_blocking(move |connection| {
            let affected = diesel::update(user_stories::table.filter(user_stories::id.eq(row.id)))
                .set(&row)
                .execute(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            ensure_updated(affected, item)
        })
        .await
    }

    async fn find_by_id(&self, id: StoryId) -> WorkItemRepositoryResult<Option<UserStory>> {
        self.run_blocking(move |connection| {
            let row = user_stories::table
                .filter(user_stories::id.eq(id.into_inner()))
                .select(StoryRow::as_select())
                .first::<StoryRow>(connection)
                .optional()
                .map_err(WorkItemRepositoryError::persistence)?;
            row.map(row_to_story).transpose()
        })
        .await
    }

    async fn find_by_epic(&self, epic: EpicId) -> WorkItemRepositoryResult<Vec<UserStory>> {
        self.run_blocking(move |connection| {
            let rows = user_stories::table
                .filter(user_stories::epic_id.eq(epic.into_inner()))
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_story).collect()
        })
        .await
    }

    async fn delete(&self, id: StoryId) -> WorkItemRepositoryResult<()> {
        let item = WorkItemRef::story(id);
        self.run_blocking(move |connection| {
            connection
                .transaction(|conn| {
                    diesel::delete(tasks::table.filter(tasks::story_id.eq(id.into_inner())))
                        .execute(conn)?;
                    diesel::delete(user_stories::table.filter(user_stories::id.eq(id.into_inner())))
                        .execute(conn)
                })
                .map_err(WorkItemRepositoryError::persistence)
                .and_then(|affected| ensure_updated(affected, item))
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresWorkItemRepository {
    async fn store(&self, task: &Task) -> WorkItemRepositoryResult<()> {
        let row = task_to_row(task)?;
        let item = WorkItemRef::task(task.id());
        let parent = WorkItemRef::story(task.story());
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, item, Some(parent)))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> WorkItemRepositoryResult<()> {
        let row = task_to_row(task)?;
        let item = WorkItemRef::task(task.id());
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                .set(&row)
                .execute(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            ensure_updated(affected, item)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> WorkItemRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(WorkItemRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_story(&self, story: StoryId) -> WorkItemRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::story_id.eq(story.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> WorkItemRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::due_date.lt(Some(now)))
                .filter(tasks::status.ne_all(TERMINAL_STATUSES))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> WorkItemRepositoryResult<()> {
        let item = WorkItemRef::task(id);
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            ensure_updated(affected, item)
        })
        .await
    }
}

fn epic_to_row(epic: &Epic) -> EpicRow {
    EpicRow {
        id: epic.id().into_inner(),
        title: epic.title().to_owned(),
        description: epic.description().to_owned(),
        status: epic.status().as_str().to_owned(),
        priority: epic.priority().as_str().to_owned(),
        owner_id: epic.owner().into_inner(),
        reporter_id: epic.reporter().map(UserId::into_inner),
        start_date: epic.start_date(),
        due_date: epic.due_date(),
        created_at: epic.created_at(),
        updated_at: epic.updated_at(),
    }
}

fn row_to_epic(row: EpicRow) -> WorkItemRepositoryResult<Epic> {
    let status = Status::try_from(row.status.as_str())
        .map_err(WorkItemRepositoryError::persistence)?;
    let priority = Priority::try_from(row.priority.as_str())
        .map_err(WorkItemRepositoryError::persistence)?;

    Ok(Epic::from_persisted(PersistedEpicData {
        id: EpicId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        status,
        priority,
        owner: UserId::from_uuid(row.owner_id),
        reporter: row.reporter_id.map(UserId::from_uuid),
        start_date: row.start_date,
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn story_to_row(story: &UserStory) -> WorkItemRepositoryResult<StoryRow> {
    let story_points = story
        .story_points()
        .map(i16::try_from)
        .transpose()
        .map_err(WorkItemRepositoryError::persistence)?;

    Ok(StoryRow {
        id: story.id().into_inner(),
        epic_id: story.epic().into_inner(),
        title: story.title().to_owned(),
        description: story.description().to_owned(),
        as_a: story.as_a().to_owned(),
        i_want: story.i_want().to_owned(),
        so_that: story.so_that().to_owned(),
        status: story.status().as_str().to_owned(),
        priority: story.priority().as_str().to_owned(),
        assigned_to_id: story.assigned_to().map(UserId::into_inner),
        reporter_id: story.reporter().map(UserId::into_inner),
        story_points,
        start_date: story.start_date(),
        due_date: story.due_date(),
        created_at: story.created_at(),
        updated_at: story.updated_at(),
    })
}

fn row_to_story(row: StoryRow) -> WorkItemRepositoryResult<UserStory> {
    let status = Status::try_from(row.status.as_str())
        .map_err(WorkItemRepositoryError::persistence)?;
    let priority = Priority::try_from(row.priority.as_str())
        .map_err(WorkItemRepositoryError::persistence)?;
    let story_points = row
        .story_points
        .map(u16::try_from)
        .transpose()
        .map_err(WorkItemRepositoryError::persistence)?;

    Ok(UserStory::from_persisted(PersistedStoryData {
        id: StoryId::from_uuid(row.id),
        epic: EpicId::from_uuid(row.epic_id),
        title: row.title,
        description: row.description,
        as_a: row.as_a,
        i_want: row.i_want,
        so_that: row.so_that,
        status,
        priority,
        assigned_to: row.assigned_to_id.map(UserId::from_uuid),
        reporter: row.reporter_id.map(UserId::from_uuid),
        story_points,
        start_date: row.start_date,
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn task_to_row(task: &Task) -> WorkItemRepositoryResult<TaskRow> {
    let estimated_minutes = task
        .estimated_minutes()
        .map(i32::try_from)
        .transpose()
        .map_err(WorkItemRepositoryError::persistence)?;
    let actual_minutes = task
        .actual_minutes()
        .map(i32::try_from)
        .transpose()
        .map_err(WorkItemRepositoryError::persistence)?;

    Ok(TaskRow {
        id: task.id().into_inner(),
        story_id: task.story().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to_id: task.assigned_to().map(UserId::into_inner),
        reporter_id: task.reporter().map(UserId::into_inner),
        estimated_minutes,
        actual_minutes,
        due_date: task.due_date(),
        completed_at: task.completed_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> WorkItemRepositoryResult<Task> {
    let status = Status::try_from(row.status.as_str())
        .map_err(WorkItemRepositoryError::persistence)?;
    let priority = Priority::try_from(row.priority.as_str())
        .map_err(WorkItemRepositoryError::persistence)?;
    let estimated_minutes = row
        .estimated_minutes
        .map(u32::try_from)
        .transpose()
        .map_err(WorkItemRepositoryError::persistence)?;
    let actual_minutes = row
        .actual_minutes
        .map(u32::try_from)
        .transpose()
        .map_err(WorkItemRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        story: StoryId::from_uuid(row.story_id),
        title: row.title,
        description: row.description,
        status,
        priority,
        assigned_to: row.assigned_to_id.map(UserId::from_uuid),
        reporter: row.reporter_id.map(UserId::from_uuid),
        estimated_minutes,
        actual_minutes,
        due_date: row.due_date,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
