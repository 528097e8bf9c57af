//! Error types for work-item domain validation and parsing.

use super::{Status, WorkItemKind};
use thiserror::Error;

/// Errors returned while constructing or mutating work-item values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkItemDomainError {
    /// The title is empty after trimming.
    #[error("{kind} title must not be empty")]
    EmptyTitle {
        /// Kind being validated.
        kind: WorkItemKind,
    },

    /// The status is outside the kind's closed set.
    #[error("status {status} is not allowed for {kind}")]
    StatusNotAllowed {
        /// Kind being validated.
        kind: WorkItemKind,
        /// Rejected status.
        status: Status,
    },

    /// The reporter matches the primary actor.
    #[error("reporter cannot be the same as the assigned user on a {kind}")]
    ReporterIsPrimaryActor {
        /// Kind being validated.
        kind: WorkItemKind,
    },
}

/// Error returned while parsing work-item kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown work-item kind: {0}")]
pub struct ParseKindError(pub String);

/// Error returned while parsing statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
