//! Completion statistics projections.

use super::Status;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Done-versus-total completion counts for a set of child items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStats {
    total: u64,
    done: u64,
}

impl CompletionStats {
    /// Builds completion counts from an iterator of child statuses.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut total = 0;
        let mut done = 0;
        for status in statuses {
            total += 1;
            if status == Status::Done {
                done += 1;
            }
        }
        Self { total, done }
    }

    /// Returns the number of child items.
    #[must_use]
    pub const fn total(self) -> u64 {
        self.total
    }

    /// Returns the number of completed child items.
    #[must_use]
    pub const fn done(self) -> u64 {
        self.done
    }

    /// Returns the completion percentage in basis points (hundredths of a
    /// percent), truncated. An empty set completes to zero.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "truncating basis-point percentage is the intended rounding"
    )]
    pub const fn percent_basis_points(self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        self.done * 10_000 / self.total
    }
}

/// Per-status counts for a set of work items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    total: u64,
    todo: u64,
    in_progress: u64,
    done: u64,
    blocked: u64,
    cancelled: u64,
}

impl StatusBreakdown {
    /// Builds a breakdown from an iterator of statuses.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut breakdown = Self::default();
        for status in statuses {
            breakdown.total += 1;
            match status {
                Status::Todo => breakdown.todo += 1,
                Status::InProgress => breakdown.in_progress += 1,
                Status::Done => breakdown.done += 1,
                Status::Blocked => breakdown.blocked += 1,
                Status::Cancelled => breakdown.cancelled += 1,
            }
        }
        breakdown
    }

    /// Returns the total number of items counted.
    #[must_use]
    pub const fn total(self) -> u64 {
        self.total
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn count(self, status: Status) -> u64 {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::Done => self.done,
            Status::Blocked => self.blocked,
            Status::Cancelled => self.cancelled,
        }
    }

    /// Returns the done-versus-total completion view of this breakdown.
    #[must_use]
    pub const fn completion(self) -> CompletionStats {
        CompletionStats {
            total: self.total,
            done: self.done,
        }
    }
}

impl fmt::Display for CompletionStats {
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "splitting basis points into whole and fractional percent digits"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let basis_points = self.percent_basis_points();
        write!(f, "{}.{:02}%", basis_points / 100, basis_points % 100)
    }
}
