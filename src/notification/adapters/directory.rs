//! Repository-backed work-item directory.

use crate::notification::domain::WorkItemSnapshot;
use crate::notification::ports::{DirectoryError, DirectoryResult, WorkItemDirectory};
use crate::workitem::{
    domain::{Epic, EpicId, StoryId, Task, TaskId, UserStory, WorkItemKind, WorkItemRef},
    ports::{EpicRepository, StoryRepository, TaskRepository},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Directory adapter resolving snapshots through the three repositories.
#[derive(Clone)]
pub struct RepositoryDirectory<E, S, T>
where
    E: EpicRepository,
    S: StoryRepository,
    T: TaskRepository,
{
    epics: Arc<E>,
    stories: Arc<S>,
    tasks: Arc<T>,
}

impl<E, S, T> RepositoryDirectory<E, S, T>
where
    E: EpicRepository,
    S: StoryRepository,
    T: TaskRepository,
{
    /// Creates a directory over the given repositories.
    #[must_use]
    pub const fn new(epics: Arc<E>, stories: Arc<S>, tasks: Arc<T>) -> Self {
        Self {
            epics,
            stories,
            tasks,
        }
    }
}

fn epic_snapshot(epic: &Epic) -> WorkItemSnapshot {
    WorkItemSnapshot {
        item: WorkItemRef::epic(epic.id()),
        title: epic.title().to_owned(),
        status: epic.status(),
        priority: epic.priority(),
        primary_actor: Some(epic.owner()),
        reporter: epic.reporter(),
    }
}

fn story_snapshot(story: &UserStory) -> WorkItemSnapshot {
    WorkItemSnapshot {
        item: WorkItemRef::story(story.id()),
        title: story.title().to_owned(),
        status: story.status(),
        priority: story.priority(),
        primary_actor: story.assigned_to(),
        reporter: story.reporter(),
    }
}

fn task_snapshot(task: &Task) -> WorkItemSnapshot {
    WorkItemSnapshot {
        item: WorkItemRef::task(task.id()),
        title: task.title().to_owned(),
        status: task.status(),
        priority: task.priority(),
        primary_actor: task.assigned_to(),
        reporter: task.reporter(),
    }
}

#[async_trait]
impl<E, S, T> WorkItemDirectory for RepositoryDirectory<E, S, T>
where
    E: EpicRepository,
    S: StoryRepository,
    T: TaskRepository,
{
    async fn fetch(&self, item: WorkItemRef) -> DirectoryResult<Option<WorkItemSnapshot>> {
        match item.kind {
            WorkItemKind::Epic => {
                let found = self
                    .epics
                    .find_by_id(EpicId::from_uuid(item.id))
                    .await
                    .map_err(DirectoryError::lookup)?;
                Ok(found.as_ref().map(epic_snapshot))
            }
            WorkItemKind::UserStory => {
                let found = self
                    .stories
                    .find_by_id(StoryId::from_uuid(item.id))
                    .await
                    .map_err(DirectoryError::lookup)?;
                Ok(found.as_ref().map(story_snapshot))
            }
            WorkItemKind::Task => {
                let found = self
                    .tasks
                    .find_by_id(TaskId::from_uuid(item.id))
                    .await
                    .map_err(DirectoryError::lookup)?;
                Ok(found.as_ref().map(task_snapshot))
            }
        }
    }
}
