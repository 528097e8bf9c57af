//! Recipient resolution for notification mail.

use crate::account::domain::{EmailAddress, User};
use std::collections::BTreeSet;

/// Resolves the notification recipients for a work item.
///
/// The primary actor (owner for epics, assignee otherwise) and the reporter
/// each contribute their email address when the user is present and carries
/// one; the two contributions are independent. The result is a set, so an
/// actor doubling as reporter yields a single address.
#[must_use]
pub fn resolve_recipients(
    primary_actor: Option<&User>,
    reporter: Option<&User>,
) -> BTreeSet<EmailAddress> {
    let mut recipients = BTreeSet::new();
    if let Some(email) = primary_actor.and_then(User::email) {
        recipients.insert(email.clone());
    }
    if let Some(email) = reporter.and_then(User::email) {
        recipients.insert(email.clone());
    }
    recipients
}
