//! Unit tests for recipient resolution.

use crate::account::domain::{EmailAddress, User};
use crate::notification::domain::resolve_recipients;
use eyre::ensure;
use rstest::rstest;

fn user_with_email(username: &str, email: &str) -> eyre::Result<User> {
    Ok(User::new(username)?.with_email(EmailAddress::new(email)?))
}

#[rstest]
fn both_actors_contribute_their_emails() -> eyre::Result<()> {
    let assignee = user_with_email("ada", "ada@example.com")?;
    let reporter = user_with_email("grace", "grace@example.com")?;

    let recipients = resolve_recipients(Some(&assignee), Some(&reporter));

    ensure!(recipients.len() == 2);
    ensure!(recipients.contains(&EmailAddress::new("ada@example.com")?));
    ensure!(recipients.contains(&EmailAddress::new("grace@example.com")?));
    Ok(())
}

#[rstest]
fn shared_email_collapses_to_one_entry() -> eyre::Result<()> {
    let assignee = user_with_email("ada", "shared@example.com")?;
    let reporter = user_with_email("grace", "shared@example.com")?;

    let recipients = resolve_recipients(Some(&assignee), Some(&reporter));

    ensure!(recipients.len() == 1);
    Ok(())
}

#[rstest]
fn missing_actors_resolve_to_empty_set() {
    let recipients = resolve_recipients(None, None);
    assert!(recipients.is_empty());
}

#[rstest]
fn users_without_email_are_skipped() -> eyre::Result<()> {
    let assignee = User::new("ada")?;
    let reporter = user_with_email("grace", "grace@example.com")?;

    let recipients = resolve_recipients(Some(&assignee), Some(&reporter));

    ensure!(recipients.len() == 1);
    ensure!(recipients.contains(&EmailAddress::new("grace@example.com")?));
    Ok(())
}

#[rstest]
fn reporter_alone_is_enough() -> eyre::Result<()> {
    let reporter = user_with_email("grace", "grace@example.com")?;
    let recipients = resolve_recipients(None, Some(&reporter));
    ensure!(recipients.len() == 1);
    Ok(())
}
