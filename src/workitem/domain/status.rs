//! Work-item kinds, statuses, and priorities.

use super::{ParseKindError, ParsePriorityError, ParseStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind discriminator for the three work-item levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    /// Top-level initiative grouping user stories.
    Epic,
    /// Mid-level story grouping tasks.
    UserStory,
    /// Lowest-level unit of work.
    Task,
}

impl WorkItemKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Epic => "epic",
            Self::UserStory => "user_story",
            Self::Task => "task",
        }
    }

    /// Returns the human-readable label used in notification text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Epic => "Epic",
            Self::UserStory => "UserStory",
            Self::Task => "Task",
        }
    }

    /// Returns whether the given status belongs to this kind's closed set.
    ///
    /// Tasks additionally allow [`Status::Blocked`]; epics and user stories
    /// do not.
    #[must_use]
    pub const fn allows(self, status: Status) -> bool {
        match status {
            Status::Blocked => matches!(self, Self::Task),
            Status::Todo | Status::InProgress | Status::Done | Status::Cancelled => true,
        }
    }
}

impl fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WorkItemKind {
    type Error = ParseKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "epic" => Ok(Self::Epic),
            "user_story" => Ok(Self::UserStory),
            "task" => Ok(Self::Task),
            _ => Err(ParseKindError(value.to_owned())),
        }
    }
}

/// Work-item status.
///
/// One shared enum covers all three kinds; membership in a kind's closed set
/// is checked at write-validation time via [`WorkItemKind::allows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Work has not started.
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
    /// Work cannot proceed (tasks only).
    Blocked,
    /// Work has been abandoned.
    Cancelled,
}

impl Status {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::Blocked => "BLOCKED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns whether the status is terminal for scheduling purposes.
    ///
    /// Terminal items are excluded from the overdue-reminder scan.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Status {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            "BLOCKED" => Ok(Self::Blocked),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// Work-item priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Critical,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
