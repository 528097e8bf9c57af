//! Dispatcher handler: resolve, compose, send.

use crate::account::domain::{EmailAddress, User, UserId};
use crate::account::ports::UserRepository;
use crate::notification::domain::{
    DeliveryOutcome, MailMessage, MailTemplates, MessageRenderError, WorkItemSnapshot,
    resolve_recipients,
};
use crate::notification::ports::{MailTransport, NotificationJob, WorkItemDirectory};
use crate::workitem::domain::{Status, WorkItemRef};
use std::sync::Arc;
use tracing::warn;

/// Executes notification jobs on the worker side of the queue.
///
/// The handler is safe to run more than once for the same job: it holds no
/// state between attempts and a duplicate delivery just sends a duplicate
/// email. Every failure is converted into a terminal [`DeliveryOutcome`] so
/// nothing propagates into the queue's retry machinery.
#[derive(Clone)]
pub struct Notifier<D, U, M>
where
    D: WorkItemDirectory,
    U: UserRepository,
    M: MailTransport,
{
    directory: Arc<D>,
    users: Arc<U>,
    mail: Arc<M>,
    templates: MailTemplates,
    sender: EmailAddress,
}

impl<D, U, M> Notifier<D, U, M>
where
    D: WorkItemDirectory,
    U: UserRepository,
    M: MailTransport,
{
    /// Creates a handler with the given collaborators and sender address.
    #[must_use]
    pub const fn new(
        directory: Arc<D>,
        users: Arc<U>,
        mail: Arc<M>,
        templates: MailTemplates,
        sender: EmailAddress,
    ) -> Self {
        Self {
            directory,
            users,
            mail,
            templates,
            sender,
        }
    }

    /// Runs one job to a terminal outcome.
    pub async fn handle(&self, job: NotificationJob) -> DeliveryOutcome {
        match job {
            NotificationJob::StatusChanged {
                item,
                old_status,
                new_status,
            } => self.status_changed(item, old_status, new_status).await,
            NotificationJob::OverdueReminder { item } => self.overdue_reminder(item).await,
        }
    }

    async fn status_changed(
        &self,
        item: WorkItemRef,
        old_status: Status,
        new_status: Status,
    ) -> DeliveryOutcome {
        let snapshot = match self.refetch(item).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return DeliveryOutcome::NotFound { item },
            Err(outcome) => return outcome,
        };

        // Message text uses the statuses captured at submit time; only the
        // recipient set reflects the state at execution time.
        let rendered = self
            .templates
            .status_change(&snapshot, old_status, new_status);
        self.deliver(&snapshot, rendered).await
    }

    async fn overdue_reminder(&self, item: WorkItemRef) -> DeliveryOutcome {
        let snapshot = match self.refetch(item).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return DeliveryOutcome::NotFound { item },
            Err(outcome) => return outcome,
        };

        let rendered = self.templates.overdue_reminder(&snapshot);
        self.deliver(&snapshot, rendered).await
    }

    async fn deliver(
        &self,
        snapshot: &WorkItemSnapshot,
        rendered: Result<(String, String), MessageRenderError>,
    ) -> DeliveryOutcome {
        let (subject, body) = match rendered {
            Ok(parts) => parts,
            Err(err) => {
                return DeliveryOutcome::SendFailure {
                    reason: err.to_string(),
                };
            }
        };

        let primary = self.lookup_user(snapshot.primary_actor).await;
        let reporter = self.lookup_user(snapshot.reporter).await;
        let resolved = resolve_recipients(primary.as_ref(), reporter.as_ref());
        if resolved.is_empty() {
            return DeliveryOutcome::NoRecipients;
        }

        let recipients: Vec<EmailAddress> = resolved.into_iter().collect();
        let message = MailMessage {
            subject,
            body,
            from: self.sender.clone(),
            recipients: recipients.clone(),
        };

        match self.mail.send(&message).await {
            Ok(()) => DeliveryOutcome::Sent { recipients },
            Err(err) => DeliveryOutcome::SendFailure {
                reason: err.to_string(),
            },
        }
    }

    /// Re-fetches the item at execution time.
    ///
    /// A store failure here is terminal for the attempt and recorded as a
    /// failure outcome, matching the no-unhandled-faults handler contract.
    async fn refetch(
        &self,
        item: WorkItemRef,
    ) -> Result<Option<WorkItemSnapshot>, DeliveryOutcome> {
        self.directory.fetch(item).await.map_err(|err| {
            warn!(%item, error = %err, "work-item re-fetch failed");
            DeliveryOutcome::SendFailure {
                reason: err.to_string(),
            }
        })
    }

    /// Looks up one referenced user, degrading lookup failures to "absent".
    async fn lookup_user(&self, reference: Option<UserId>) -> Option<User> {
        let user_id = reference?;
        match self.users.find_by_id(user_id).await {
            Ok(found) => found,
            Err(err) => {
                warn!(user = %user_id, error = %err, "recipient lookup failed, treating as absent");
                None
            }
        }
    }
}
