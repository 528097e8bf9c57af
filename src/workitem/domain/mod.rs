//! Domain model for the work-item hierarchy.
//!
//! Epics contain user stories, user stories contain tasks. All three share
//! an observable shape (status, priority, title, actor references) while
//! keeping kind-specific fields and invariants local to each aggregate.

mod epic;
mod error;
mod ids;
mod stats;
mod status;
mod story;
mod task;
mod validate;

pub use epic::{Epic, PersistedEpicData};
pub use error::{ParseKindError, ParsePriorityError, ParseStatusError, WorkItemDomainError};
pub use ids::{EpicId, StoryId, TaskId, WorkItemRef};
pub use stats::{CompletionStats, StatusBreakdown};
pub use status::{Priority, Status, WorkItemKind};
pub use story::{PersistedStoryData, UserStory};
pub use task::{PersistedTaskData, Task};
