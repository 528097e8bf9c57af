//! Unit tests for work-item domain validation and projections.

use crate::account::domain::UserId;
use crate::workitem::domain::{
    Epic, EpicId, Status, StoryId, Task, UserStory, WorkItemDomainError, WorkItemKind,
};
use chrono::Duration;
use eyre::{bail, ensure};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
#[case(WorkItemKind::Epic, Status::Todo, true)]
#[case(WorkItemKind::Epic, Status::Blocked, false)]
#[case(WorkItemKind::UserStory, Status::Blocked, false)]
#[case(WorkItemKind::UserStory, Status::Cancelled, true)]
#[case(WorkItemKind::Task, Status::Blocked, true)]
#[case(WorkItemKind::Task, Status::Done, true)]
fn status_membership_follows_kind(
    #[case] kind: WorkItemKind,
    #[case] status: Status,
    #[case] expected: bool,
) {
    assert_eq!(kind.allows(status), expected);
}

#[rstest]
#[case(Status::Todo, false)]
#[case(Status::InProgress, false)]
#[case(Status::Blocked, false)]
#[case(Status::Done, true)]
#[case(Status::Cancelled, true)]
fn terminal_statuses_are_done_and_cancelled(#[case] status: Status, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
#[case("TODO", Status::Todo)]
#[case(" in_progress ", Status::InProgress)]
#[case("BLOCKED", Status::Blocked)]
fn status_parses_from_storage_form(#[case] raw: &str, #[case] expected: Status) -> eyre::Result<()> {
    ensure!(Status::try_from(raw)? == expected);
    Ok(())
}

#[rstest]
fn status_rejects_unknown_values() {
    assert!(Status::try_from("PAUSED").is_err());
}

#[rstest]
fn epic_rejects_blocked_status(clock: DefaultClock) -> eyre::Result<()> {
    let mut epic = Epic::new("Payments", UserId::new(), &clock)?;
    let result = epic.set_status(Status::Blocked, &clock);
    let expected = Err(WorkItemDomainError::StatusNotAllowed {
        kind: WorkItemKind::Epic,
        status: Status::Blocked,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(epic.status() == Status::Todo);
    Ok(())
}

#[rstest]
fn epic_allows_owner_as_reporter(clock: DefaultClock) -> eyre::Result<()> {
    let owner = UserId::new();
    let epic = Epic::new("Payments", owner, &clock)?.with_reporter(Some(owner));
    ensure!(epic.reporter() == Some(owner));
    Ok(())
}

#[rstest]
fn story_rejects_reporter_matching_assignee(clock: DefaultClock) -> eyre::Result<()> {
    let user = UserId::new();
    let result =
        UserStory::new("Login flow", EpicId::new(), &clock)?.with_actors(Some(user), Some(user));
    let expected = Err(WorkItemDomainError::ReporterIsPrimaryActor {
        kind: WorkItemKind::UserStory,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    Ok(())
}

#[rstest]
fn task_rejects_assigning_current_reporter(clock: DefaultClock) -> eyre::Result<()> {
    let reporter = UserId::new();
    let mut task = Task::new("Write tests", StoryId::new(), &clock)?
        .with_actors(None, Some(reporter))?;

    let result = task.assign(Some(reporter), &clock);
    let expected = Err(WorkItemDomainError::ReporterIsPrimaryActor {
        kind: WorkItemKind::Task,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.assigned_to().is_none());
    Ok(())
}

#[rstest]
fn titles_must_not_be_blank(clock: DefaultClock) {
    let result = Task::new("   ", StoryId::new(), &clock);
    assert_eq!(
        result,
        Err(WorkItemDomainError::EmptyTitle {
            kind: WorkItemKind::Task
        })
    );
}

#[rstest]
fn full_story_formats_when_all_fragments_present(clock: DefaultClock) -> eyre::Result<()> {
    let story = UserStory::new("Login", EpicId::new(), &clock)?.with_agile_format(
        "registered user",
        "to log in with email and password",
        "I can access my board",
    );
    ensure!(
        story.full_story()
            == "As a registered user, I want to log in with email and password, \
                so that I can access my board"
    );
    Ok(())
}

#[rstest]
fn full_story_falls_back_to_description(clock: DefaultClock) -> eyre::Result<()> {
    let story = UserStory::new("Login", EpicId::new(), &clock)?
        .with_description("Plain description")
        .with_agile_format("registered user", "", "");
    ensure!(story.full_story() == "Plain description");
    Ok(())
}

#[rstest]
fn task_is_overdue_when_past_due_and_not_done(clock: DefaultClock) -> eyre::Result<()> {
    let now = clock.utc();
    let mut task = Task::new("Ship it", StoryId::new(), &clock)?
        .with_due_date(Some(now - Duration::hours(1)));
    task.set_status(Status::InProgress, &clock)?;

    ensure!(task.is_overdue(now));
    Ok(())
}

#[rstest]
fn done_task_is_never_overdue(clock: DefaultClock) -> eyre::Result<()> {
    let now = clock.utc();
    let mut task = Task::new("Ship it", StoryId::new(), &clock)?
        .with_due_date(Some(now - Duration::hours(1)));
    task.set_status(Status::Done, &clock)?;

    ensure!(!task.is_overdue(now));
    Ok(())
}

#[rstest]
fn task_without_due_date_is_not_overdue(clock: DefaultClock) -> eyre::Result<()> {
    let task = Task::new("Ship it", StoryId::new(), &clock)?;
    ensure!(!task.is_overdue(clock.utc()));
    Ok(())
}

#[rstest]
fn completing_a_task_stamps_completed_at(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = Task::new("Ship it", StoryId::new(), &clock)?;
    task.set_status(Status::Done, &clock)?;
    ensure!(task.completed_at().is_some());

    task.set_status(Status::InProgress, &clock)?;
    ensure!(task.completed_at().is_none());
    Ok(())
}
