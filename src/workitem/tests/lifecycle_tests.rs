//! Unit tests for the write path and its detector hooks.
//!
//! The queue here is the recording stand-in, so each test sees exactly the
//! dispatcher submissions its writes produced.

use crate::notification::adapters::{RecordingQueue, RepositoryDirectory};
use crate::notification::ports::NotificationJob;
use crate::notification::services::TransitionDetector;
use crate::workitem::adapters::memory::InMemoryWorkItemStore;
use crate::workitem::domain::{Epic, Status, Task, UserStory, WorkItemRef};
use crate::workitem::services::{
    CreateEpicRequest, CreateStoryRequest, CreateTaskRequest, EpicService, StoryService,
    TaskService, UpdateEpicRequest, UpdateStoryRequest, UpdateTaskRequest, WorkItemLifecycleError,
};
use crate::account::domain::UserId;
use crate::workitem::domain::{TaskId, WorkItemDomainError, WorkItemKind};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type Store = InMemoryWorkItemStore;
type Directory = RepositoryDirectory<Store, Store, Store>;
type Epics = EpicService<Store, Directory, RecordingQueue, DefaultClock>;
type Stories = StoryService<Store, Directory, RecordingQueue, DefaultClock>;
type Tasks = TaskService<Store, Directory, RecordingQueue, DefaultClock>;

struct Harness {
    queue: Arc<RecordingQueue>,
    epics: Epics,
    stories: Stories,
    tasks: Tasks,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryWorkItemStore::new());
    let directory = Arc::new(RepositoryDirectory::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
    ));
    let queue = Arc::new(RecordingQueue::new());
    let detector = TransitionDetector::new(directory, Arc::clone(&queue));
    let clock = Arc::new(DefaultClock);

    Harness {
        queue: Arc::clone(&queue),
        epics: EpicService::new(Arc::clone(&store), detector.clone(), Arc::clone(&clock)),
        stories: StoryService::new(Arc::clone(&store), detector.clone(), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::clone(&store), detector, clock),
    }
}

async fn seeded_task(harness: &Harness, status: Status) -> eyre::Result<Task> {
    let epic = harness
        .epics
        .create(CreateEpicRequest::new("Billing", UserId::new()))
        .await?;
    let story = harness
        .stories
        .create(CreateStoryRequest::new("Invoices", epic.id()))
        .await?;
    let task = harness
        .tasks
        .create(CreateTaskRequest::new("Render PDF", story.id()).with_status(status))
        .await?;
    Ok(task)
}

#[rstest]
#[case(Status::Todo)]
#[case(Status::InProgress)]
#[case(Status::Blocked)]
#[tokio::test]
async fn creation_never_emits_an_event(
    harness: Harness,
    #[case] status: Status,
) -> eyre::Result<()> {
    seeded_task(&harness, status).await?;
    ensure!(harness.queue.submitted().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn status_change_emits_exactly_one_event(harness: Harness) -> eyre::Result<()> {
    let task = seeded_task(&harness, Status::Todo).await?;

    harness
        .tasks
        .update(
            task.id(),
            UpdateTaskRequest::new().with_status(Status::InProgress),
        )
        .await?;

    let jobs = harness.queue.submitted();
    let expected = vec![NotificationJob::StatusChanged {
        item: WorkItemRef::task(task.id()),
        old_status: Status::Todo,
        new_status: Status::InProgress,
    }];
    if jobs != expected {
        bail!("expected {expected:?}, got {jobs:?}");
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn no_op_save_emits_no_event(harness: Harness) -> eyre::Result<()> {
    let task = seeded_task(&harness, Status::InProgress).await?;

    harness
        .tasks
        .update(
            task.id(),
            UpdateTaskRequest::new()
                .with_title("Render PDF v2")
                .with_status(Status::InProgress),
        )
        .await?;

    ensure!(harness.queue.submitted().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn epic_title_only_update_emits_no_event(harness: Harness) -> eyre::Result<()> {
    let epic = harness
        .epics
        .create(CreateEpicRequest::new("Billing", UserId::new()))
        .await?;

    harness
        .epics
        .update(epic.id(), UpdateEpicRequest::new().with_title("Payments"))
        .await?;

    ensure!(harness.queue.submitted().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn epic_and_story_transitions_are_detected_too(harness: Harness) -> eyre::Result<()> {
    let epic = harness
        .epics
        .create(CreateEpicRequest::new("Billing", UserId::new()))
        .await?;
    let story = harness
        .stories
        .create(CreateStoryRequest::new("Invoices", epic.id()))
        .await?;

    harness
        .epics
        .update(
            epic.id(),
            UpdateEpicRequest::new().with_status(Status::InProgress),
        )
        .await?;
    harness
        .stories
        .update(
            story.id(),
            UpdateStoryRequest::new().with_status(Status::Done),
        )
        .await?;

    let jobs = harness.queue.submitted();
    let expected = vec![
        NotificationJob::StatusChanged {
            item: WorkItemRef::epic(epic.id()),
            old_status: Status::Todo,
            new_status: Status::InProgress,
        },
        NotificationJob::StatusChanged {
            item: WorkItemRef::story(story.id()),
            old_status: Status::Todo,
            new_status: Status::Done,
        },
    ];
    if jobs != expected {
        bail!("expected {expected:?}, got {jobs:?}");
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn updating_missing_task_fails_without_events(harness: Harness) -> eyre::Result<()> {
    let result = harness
        .tasks
        .update(
            TaskId::new(),
            UpdateTaskRequest::new().with_status(Status::Done),
        )
        .await;

    ensure!(matches!(
        result,
        Err(WorkItemLifecycleError::Repository(_))
    ));
    ensure!(harness.queue.submitted().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn reporter_matching_assignee_rejects_write_before_detection(
    harness: Harness,
) -> eyre::Result<()> {
    let epic = harness
        .epics
        .create(CreateEpicRequest::new("Billing", UserId::new()))
        .await?;
    let user = UserId::new();

    let result = harness
        .stories
        .create(
            CreateStoryRequest::new("Invoices", epic.id()).with_actors(Some(user), Some(user)),
        )
        .await;

    match result {
        Err(WorkItemLifecycleError::Domain(WorkItemDomainError::ReporterIsPrimaryActor {
            kind,
        })) => ensure!(kind == WorkItemKind::UserStory),
        other => bail!("expected reporter validation failure, got {other:?}"),
    }
    ensure!(harness.queue.submitted().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn enqueue_failure_does_not_fail_the_write(harness: Harness) -> eyre::Result<()> {
    let task = seeded_task(&harness, Status::Todo).await?;
    harness.queue.close();

    let updated = harness
        .tasks
        .update(task.id(), UpdateTaskRequest::new().with_status(Status::Done))
        .await?;

    // The event is lost but the write goes through.
    ensure!(updated.status() == Status::Done);
    let stored = harness.tasks.find_by_id(task.id()).await?;
    ensure!(stored.as_ref().map(|task| task.status()) == Some(Status::Done));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn returned_aggregates_reflect_applied_patch(harness: Harness) -> eyre::Result<()> {
    let epic = harness
        .epics
        .create(
            CreateEpicRequest::new("Billing", UserId::new())
                .with_description("Everything invoicing"),
        )
        .await?;

    let updated = harness
        .epics
        .update(
            epic.id(),
            UpdateEpicRequest::new()
                .with_title("Payments")
                .with_status(Status::InProgress),
        )
        .await?;

    ensure!(updated.title() == "Payments");
    ensure!(updated.status() == Status::InProgress);
    ensure!(updated.description() == "Everything invoicing");

    let stored: Option<Epic> = harness.epics.find_by_id(epic.id()).await?;
    ensure!(stored.as_ref().map(Epic::title) == Some("Payments"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn story_updates_leave_unrelated_fields_alone(harness: Harness) -> eyre::Result<()> {
    let epic = harness
        .epics
        .create(CreateEpicRequest::new("Billing", UserId::new()))
        .await?;
    let story: UserStory = harness
        .stories
        .create(
            CreateStoryRequest::new("Invoices", epic.id())
                .with_story_points(5)
                .with_agile_format("customer", "monthly invoices", "I can track spending"),
        )
        .await?;

    let updated = harness
        .stories
        .update(
            story.id(),
            UpdateStoryRequest::new().with_status(Status::InProgress),
        )
        .await?;

    ensure!(updated.story_points() == Some(5));
    ensure!(updated.as_a() == "customer");
    Ok(())
}
