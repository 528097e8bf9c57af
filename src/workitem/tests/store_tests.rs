//! Unit tests for the in-memory work-item store.

use crate::account::domain::UserId;
use crate::workitem::adapters::memory::InMemoryWorkItemStore;
use crate::workitem::domain::{Epic, EpicId, Status, StoryId, Task, UserStory};
use crate::workitem::ports::{
    EpicRepository, StoryRepository, TaskRepository, WorkItemRepositoryError,
};
use chrono::Duration;
use eyre::{bail, ensure};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryWorkItemStore {
    InMemoryWorkItemStore::new()
}

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

async fn seed_hierarchy(
    store: &InMemoryWorkItemStore,
    clock: &DefaultClock,
) -> eyre::Result<(Epic, UserStory, Task)> {
    let epic = Epic::new("Billing", UserId::new(), clock)?;
    EpicRepository::store(store, &epic).await?;
    let story = UserStory::new("Invoices", epic.id(), clock)?;
    StoryRepository::store(store, &story).await?;
    let task = Task::new("Render PDF", story.id(), clock)?;
    TaskRepository::store(store, &task).await?;
    Ok((epic, story, task))
}

#[rstest]
#[tokio::test]
async fn deleting_an_epic_cascades_to_stories_and_tasks(
    store: InMemoryWorkItemStore,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let (epic, story, task) = seed_hierarchy(&store, &clock).await?;

    EpicRepository::delete(&store, epic.id()).await?;

    ensure!(StoryRepository::find_by_id(&store, story.id()).await?.is_none());
    ensure!(TaskRepository::find_by_id(&store, task.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn deleting_a_story_cascades_to_tasks_only(
    store: InMemoryWorkItemStore,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let (epic, story, task) = seed_hierarchy(&store, &clock).await?;

    StoryRepository::delete(&store, story.id()).await?;

    ensure!(TaskRepository::find_by_id(&store, task.id()).await?.is_none());
    ensure!(EpicRepository::find_by_id(&store, epic.id()).await?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn storing_a_story_without_its_epic_is_rejected(
    store: InMemoryWorkItemStore,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let story = UserStory::new("Orphan", EpicId::new(), &clock)?;
    let result = StoryRepository::store(&store, &story).await;
    match result {
        Err(WorkItemRepositoryError::MissingParent(parent)) => {
            ensure!(parent.id == story.epic().into_inner());
        }
        other => bail!("expected missing parent error, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn storing_a_task_without_its_story_is_rejected(
    store: InMemoryWorkItemStore,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let task = Task::new("Orphan", StoryId::new(), &clock)?;
    let result = TaskRepository::store(&store, &task).await;
    ensure!(matches!(
        result,
        Err(WorkItemRepositoryError::MissingParent(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn overdue_scan_excludes_terminal_and_future_tasks(
    store: InMemoryWorkItemStore,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let (_, story, _) = seed_hierarchy(&store, &clock).await?;
    let now = clock.utc();
    let yesterday = now - Duration::days(1);
    let tomorrow = now + Duration::days(1);

    let mut overdue_open = Task::new("Overdue open", story.id(), &clock)?
        .with_due_date(Some(yesterday));
    overdue_open.set_status(Status::InProgress, &clock)?;
    TaskRepository::store(&store, &overdue_open).await?;

    let mut overdue_done = Task::new("Overdue done", story.id(), &clock)?
        .with_due_date(Some(yesterday));
    overdue_done.set_status(Status::Done, &clock)?;
    TaskRepository::store(&store, &overdue_done).await?;

    let mut overdue_cancelled = Task::new("Overdue cancelled", story.id(), &clock)?
        .with_due_date(Some(yesterday));
    overdue_cancelled.set_status(Status::Cancelled, &clock)?;
    TaskRepository::store(&store, &overdue_cancelled).await?;

    let not_due_yet = Task::new("Future", story.id(), &clock)?.with_due_date(Some(tomorrow));
    TaskRepository::store(&store, &not_due_yet).await?;

    let found = TaskRepository::find_overdue(&store, now).await?;
    let ids: Vec<_> = found.iter().map(Task::id).collect();
    if ids != vec![overdue_open.id()] {
        bail!("expected only the open overdue task, got {ids:?}");
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn duplicate_identifiers_are_rejected(
    store: InMemoryWorkItemStore,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let (epic, _, _) = seed_hierarchy(&store, &clock).await?;
    let result = EpicRepository::store(&store, &epic).await;
    ensure!(matches!(result, Err(WorkItemRepositoryError::Duplicate(_))));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn updating_a_missing_epic_reports_not_found(
    store: InMemoryWorkItemStore,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let epic = Epic::new("Ghost", UserId::new(), &clock)?;
    let result = EpicRepository::update(&store, &epic).await;
    ensure!(matches!(result, Err(WorkItemRepositoryError::NotFound(_))));
    Ok(())
}
