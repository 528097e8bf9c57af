//! Mail message composition from templates.

use super::WorkItemSnapshot;
use crate::account::domain::EmailAddress;
use crate::workitem::domain::Status;
use minijinja::{Environment, context};
use thiserror::Error;

/// Outbound mail message handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Sender address.
    pub from: EmailAddress,
    /// Recipient addresses.
    pub recipients: Vec<EmailAddress>,
}

/// Error returned when a mail template fails to render.
#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct MessageRenderError(#[from] minijinja::Error);

const STATUS_CHANGE_SUBJECT: &str = "{{ kind }} Status Changed: {{ title }}";

const STATUS_CHANGE_BODY: &str = "\
Hello,

The status of {{ kind }} \"{{ title }}\" has been changed:

Previous Status: {{ old_status }}
New Status: {{ new_status }}

{{ kind }} Details:
- Title: {{ title }}
- Priority: {{ priority }}
- Status: {{ new_status }}

Best regards,
Task Manager System
";

const REMINDER_SUBJECT: &str = "{{ kind }} Overdue Reminder: {{ title }}";

const REMINDER_BODY: &str = "\
Hello,

The {{ kind }} \"{{ title }}\" is past its due date and is still {{ status }}.

{{ kind }} Details:
- Title: {{ title }}
- Priority: {{ priority }}
- Status: {{ status }}

Best regards,
Task Manager System
";

/// Template set for notification mail.
#[derive(Debug, Clone)]
pub struct MailTemplates {
    environment: Environment<'static>,
}

impl MailTemplates {
    /// Builds the template environment.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRenderError`] when a built-in template fails to
    /// parse; this indicates a programming error rather than bad input.
    pub fn new() -> Result<Self, MessageRenderError> {
        let mut environment = Environment::new();
        environment.add_template("status_change_subject", STATUS_CHANGE_SUBJECT)?;
        environment.add_template("status_change_body", STATUS_CHANGE_BODY)?;
        environment.add_template("reminder_subject", REMINDER_SUBJECT)?;
        environment.add_template("reminder_body", REMINDER_BODY)?;
        Ok(Self { environment })
    }

    /// Renders the status-change subject and body.
    ///
    /// The old/new pair comes from the transition event captured at submit
    /// time; title, priority, and kind come from the re-fetched snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRenderError`] when rendering fails.
    pub fn status_change(
        &self,
        snapshot: &WorkItemSnapshot,
        old_status: Status,
        new_status: Status,
    ) -> Result<(String, String), MessageRenderError> {
        let ctx = context! {
            kind => snapshot.item.kind.label(),
            title => snapshot.title,
            priority => snapshot.priority.as_str(),
            old_status => old_status.as_str(),
            new_status => new_status.as_str(),
        };
        let subject = self
            .environment
            .get_template("status_change_subject")?
            .render(&ctx)?;
        let body = self
            .environment
            .get_template("status_change_body")?
            .render(&ctx)?;
        Ok((subject, body))
    }

    /// Renders the overdue-reminder subject and body.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRenderError`] when rendering fails.
    pub fn overdue_reminder(
        &self,
        snapshot: &WorkItemSnapshot,
    ) -> Result<(String, String), MessageRenderError> {
        let ctx = context! {
            kind => snapshot.item.kind.label(),
            title => snapshot.title,
            priority => snapshot.priority.as_str(),
            status => snapshot.status.as_str(),
        };
        let subject = self
            .environment
            .get_template("reminder_subject")?
            .render(&ctx)?;
        let body = self.environment.get_template("reminder_body")?.render(&ctx)?;
        Ok((subject, body))
    }
}
