//! Unit tests for the dispatcher handler.
//!
//! These drive the full pipeline deterministically: writes go through the
//! services with a recording queue, the test drains the queue, and the
//! handler runs inline against a recording mail transport.

use crate::account::adapters::memory::InMemoryUserRepository;
use crate::account::domain::{EmailAddress, User, UserId};
use crate::account::ports::UserRepository;
use crate::notification::adapters::{
    RecordingMailTransport, RecordingQueue, RepositoryDirectory,
};
use crate::notification::domain::{DeliveryOutcome, MailTemplates};
use crate::notification::ports::NotificationJob;
use crate::notification::services::{Notifier, TransitionDetector};
use crate::workitem::adapters::memory::InMemoryWorkItemStore;
use crate::workitem::domain::{Status, Task, WorkItemRef};
use crate::workitem::ports::TaskRepository;
use crate::workitem::services::{
    CreateEpicRequest, CreateStoryRequest, CreateTaskRequest, EpicService, StoryService,
    TaskService, UpdateTaskRequest,
};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type Store = InMemoryWorkItemStore;
type Directory = RepositoryDirectory<Store, Store, Store>;
type Handler = Notifier<Directory, InMemoryUserRepository, RecordingMailTransport>;

struct Harness {
    store: Arc<Store>,
    users: Arc<InMemoryUserRepository>,
    queue: Arc<RecordingQueue>,
    mail: Arc<RecordingMailTransport>,
    epics: EpicService<Store, Directory, RecordingQueue, DefaultClock>,
    stories: StoryService<Store, Directory, RecordingQueue, DefaultClock>,
    tasks: TaskService<Store, Directory, RecordingQueue, DefaultClock>,
    notifier: Handler,
}

#[fixture]
fn harness() -> eyre::Result<Harness> {
    super::init_tracing();
    let store = Arc::new(InMemoryWorkItemStore::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let directory = Arc::new(RepositoryDirectory::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
    ));
    let queue = Arc::new(RecordingQueue::new());
    let mail = Arc::new(RecordingMailTransport::new());
    let detector = TransitionDetector::new(Arc::clone(&directory), Arc::clone(&queue));
    let clock = Arc::new(DefaultClock);
    let notifier = Notifier::new(
        Arc::clone(&directory),
        Arc::clone(&users),
        Arc::clone(&mail),
        MailTemplates::new()?,
        EmailAddress::new("noreply@example.com")?,
    );

    Ok(Harness {
        store: Arc::clone(&store),
        users: Arc::clone(&users),
        queue: Arc::clone(&queue),
        mail: Arc::clone(&mail),
        epics: EpicService::new(Arc::clone(&store), detector.clone(), Arc::clone(&clock)),
        stories: StoryService::new(Arc::clone(&store), detector.clone(), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::clone(&store), detector, clock),
        notifier,
    })
}

async fn seeded_user(harness: &Harness, username: &str, email: &str) -> eyre::Result<User> {
    let user = User::new(username)?.with_email(EmailAddress::new(email)?);
    harness.users.store(&user).await?;
    Ok(user)
}

/// Creates an epic → story → task chain; the task carries the given actors.
async fn seeded_task(
    harness: &Harness,
    assigned_to: Option<&User>,
    reporter: Option<&User>,
) -> eyre::Result<Task> {
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
        .create(
            CreateTaskRequest::new("Render PDF", story.id())
                .with_actors(assigned_to.map(User::id), reporter.map(User::id)),
        )
        .await?;
    Ok(task)
}

async fn single_status_change_job(harness: &Harness, task: &Task) -> eyre::Result<NotificationJob> {
    harness
        .tasks
        .update(
            task.id(),
            UpdateTaskRequest::new().with_status(Status::InProgress),
        )
        .await?;
    let mut jobs = harness.queue.drain();
    match (jobs.pop(), jobs.is_empty()) {
        (Some(job), true) => Ok(job),
        other => bail!("expected exactly one job, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn status_change_mails_assignee_and_reporter(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let assignee = seeded_user(&harness, "ada", "ada@example.com").await?;
    let reporter = seeded_user(&harness, "grace", "grace@example.com").await?;
    let task = seeded_task(&harness, Some(&assignee), Some(&reporter)).await?;

    let job = single_status_change_job(&harness, &task).await?;
    let outcome = harness.notifier.handle(job).await;

    match &outcome {
        DeliveryOutcome::Sent { recipients } => ensure!(recipients.len() == 2),
        other => bail!("expected sent outcome, got {other:?}"),
    }

    let sent = harness.mail.sent();
    let [message] = sent.as_slice() else {
        bail!("expected exactly one message, got {}", sent.len());
    };
    ensure!(message.subject == "Task Status Changed: Render PDF");
    ensure!(message.body.contains("Previous Status: TODO"));
    ensure!(message.body.contains("New Status: IN_PROGRESS"));
    ensure!(message.body.contains("- Priority: MEDIUM"));
    ensure!(message.from.as_str() == "noreply@example.com");
    ensure!(message.recipients.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn actors_without_accounts_mean_no_recipients(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let task = seeded_task(&harness, None, None).await?;

    let job = single_status_change_job(&harness, &task).await?;
    let outcome = harness.notifier.handle(job).await;

    ensure!(outcome == DeliveryOutcome::NoRecipients);
    ensure!(outcome.to_string() == "no recipients with valid email addresses");
    ensure!(harness.mail.sent().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn vanished_item_is_a_graceful_not_found(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let assignee = seeded_user(&harness, "ada", "ada@example.com").await?;
    let task = seeded_task(&harness, Some(&assignee), None).await?;

    let job = single_status_change_job(&harness, &task).await?;
    TaskRepository::delete(&*harness.store, task.id()).await?;

    let outcome = harness.notifier.handle(job).await;
    ensure!(
        outcome
            == DeliveryOutcome::NotFound {
                item: WorkItemRef::task(task.id())
            }
    );
    ensure!(harness.mail.sent().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn duplicate_delivery_is_tolerated(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let assignee = seeded_user(&harness, "ada", "ada@example.com").await?;
    let task = seeded_task(&harness, Some(&assignee), None).await?;

    let job = single_status_change_job(&harness, &task).await?;
    let first = harness.notifier.handle(job.clone()).await;
    let second = harness.notifier.handle(job).await;

    ensure!(matches!(first, DeliveryOutcome::Sent { .. }));
    ensure!(matches!(second, DeliveryOutcome::Sent { .. }));
    ensure!(harness.mail.sent().len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn transport_failure_is_a_terminal_outcome(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let assignee = seeded_user(&harness, "ada", "ada@example.com").await?;
    let task = seeded_task(&harness, Some(&assignee), None).await?;
    harness.mail.reject_with("smtp unreachable");

    let job = single_status_change_job(&harness, &task).await?;
    let outcome = harness.notifier.handle(job).await;

    match &outcome {
        DeliveryOutcome::SendFailure { reason } => {
            ensure!(reason.contains("smtp unreachable"));
        }
        other => bail!("expected send failure, got {other:?}"),
    }
    ensure!(outcome.to_string().starts_with("failed to send email"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn reminder_job_renders_the_overdue_template(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let assignee = seeded_user(&harness, "ada", "ada@example.com").await?;
    let task = seeded_task(&harness, Some(&assignee), None).await?;

    let outcome = harness
        .notifier
        .handle(NotificationJob::OverdueReminder {
            item: WorkItemRef::task(task.id()),
        })
        .await;

    ensure!(matches!(outcome, DeliveryOutcome::Sent { .. }));
    let sent = harness.mail.sent();
    let [message] = sent.as_slice() else {
        bail!("expected exactly one message, got {}", sent.len());
    };
    ensure!(message.subject == "Task Overdue Reminder: Render PDF");
    ensure!(message.body.contains("past its due date"));
    ensure!(message.body.contains("- Status: TODO"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn recipients_reflect_state_at_execution_time(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let original = seeded_user(&harness, "ada", "ada@example.com").await?;
    let replacement = seeded_user(&harness, "grace", "grace@example.com").await?;
    let task = seeded_task(&harness, Some(&original), None).await?;
    let job = single_status_change_job(&harness, &task).await?;

    // Reassign between submission and execution.
    harness
        .tasks
        .update(
            task.id(),
            UpdateTaskRequest::new().with_assignee(Some(replacement.id())),
        )
        .await?;
    harness.queue.drain();

    let outcome = harness.notifier.handle(job).await;
    match outcome {
        DeliveryOutcome::Sent { recipients } => {
            ensure!(recipients == vec![EmailAddress::new("grace@example.com")?]);
        }
        other => bail!("expected sent outcome, got {other:?}"),
    }

    // The message text still reports the transition captured at submit time.
    let sent = harness.mail.sent();
    let [message] = sent.as_slice() else {
        bail!("expected exactly one message, got {}", sent.len());
    };
    ensure!(message.body.contains("Previous Status: TODO"));
    ensure!(message.body.contains("New Status: IN_PROGRESS"));
    Ok(())
}
