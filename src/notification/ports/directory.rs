//! Read port over the work-item store for the notification pipeline.

use crate::notification::domain::WorkItemSnapshot;
use crate::workitem::domain::WorkItemRef;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Kind-agnostic point lookup used by the detector's before-hook and the
/// dispatcher handler's re-fetch.
#[async_trait]
pub trait WorkItemDirectory: Send + Sync {
    /// Fetches the notification-relevant slice of a work item.
    ///
    /// Returns `None` when the item does not exist — a normal answer for
    /// both callers (first save in the before-hook, vanished item in the
    /// handler), not an error.
    async fn fetch(&self, item: WorkItemRef) -> DirectoryResult<Option<WorkItemSnapshot>>;
}

/// Errors returned by directory adapters.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Underlying store failure.
    #[error("work-item lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a store error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
