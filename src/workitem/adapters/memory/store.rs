//! In-memory work-item store.
//!
//! One store backs all three repositories so parent checks and cascade
//! deletes can see the whole hierarchy, the way a single database would.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workitem::{
    domain::{Epic, EpicId, StoryId, Task, TaskId, UserStory, WorkItemRef},
    ports::{
        EpicRepository, StoryRepository, TaskRepository, WorkItemRepositoryError,
        WorkItemRepositoryResult,
    },
};

/// Thread-safe in-memory store for the whole work-item hierarchy.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkItemStore {
    state: Arc<RwLock<InMemoryWorkItemState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkItemState {
    epics: HashMap<EpicId, Epic>,
    stories: HashMap<StoryId, UserStory>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryWorkItemStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(
        &self,
    ) -> WorkItemRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryWorkItemState>> {
        self.state.write().map_err(|err| {
            WorkItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read_state(
        &self,
    ) -> WorkItemRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryWorkItemState>> {
        self.state.read().map_err(|err| {
            WorkItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn remove_story_cascade(state: &mut InMemoryWorkItemState, story_id: StoryId) {
    state.stories.remove(&story_id);
    state.tasks.retain(|_, task| task.story() != story_id);
}

#[async_trait]
impl EpicRepository for InMemoryWorkItemStore {
    async fn store(&self, epic: &Epic) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.epics.contains_key(&epic.id()) {
            return Err(WorkItemRepositoryError::Duplicate(WorkItemRef::epic(
                epic.id(),
            )));
        }
        state.epics.insert(epic.id(), epic.clone());
        Ok(())
    }

    async fn update(&self, epic: &Epic) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.epics.contains_key(&epic.id()) {
            return Err(WorkItemRepositoryError::NotFound(WorkItemRef::epic(
                epic.id(),
            )));
        }
        state.epics.insert(epic.id(), epic.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EpicId) -> WorkItemRepositoryResult<Option<Epic>> {
        let state = self.read_state()?;
        Ok(state.epics.get(&id).cloned())
    }

    async fn delete(&self, id: EpicId) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.epics.remove(&id).is_none() {
            return Err(WorkItemRepositoryError::NotFound(WorkItemRef::epic(id)));
        }
        let orphaned: Vec<StoryId> = state
            .stories
            .values()
            .filter(|story| story.epic() == id)
            .map(UserStory::id)
            .collect();
        for story_id in orphaned {
            remove_story_cascade(&mut state, story_id);
        }
        Ok(())
    }
}

#[async_trait]
impl StoryRepository for InMemoryWorkItemStore {
    async fn store(&self, story: &UserStory) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.stories.contains_key(&story.id()) {
            return Err(WorkItemRepositoryError::Duplicate(WorkItemRef::story(
                story.id(),
            )));
        }
        if !state.epics.contains_key(&story.epic()) {
            return Err(WorkItemRepositoryError::MissingParent(WorkItemRef::epic(
                story.epic(),
            )));
        }
        state.stories.insert(story.id(), story.clone());
        Ok(())
    }

    async fn update(&self, story: &UserStory) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.stories.contains_key(&story.id()) {
            return Err(WorkItemRepositoryError::NotFound(WorkItemRef::story(
                story.id(),
            )));
        }
        state.stories.insert(story.id(), story.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StoryId) -> WorkItemRepositoryResult<Option<UserStory>> {
        let state = self.read_state()?;
        Ok(state.stories.get(&id).cloned())
    }

    async fn find_by_epic(&self, epic: EpicId) -> WorkItemRepositoryResult<Vec<UserStory>> {
        let state = self.read_state()?;
        Ok(state
            .stories
            .values()
            .filter(|story| story.epic() == epic)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: StoryId) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.stories.contains_key(&id) {
            return Err(WorkItemRepositoryError::NotFound(WorkItemRef::story(id)));
        }
        remove_story_cascade(&mut state, id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryWorkItemStore {
    async fn store(&self, task: &Task) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(WorkItemRepositoryError::Duplicate(WorkItemRef::task(
                task.id(),
            )));
        }
        if !state.stories.contains_key(&task.story()) {
            return Err(WorkItemRepositoryError::MissingParent(WorkItemRef::story(
                task.story(),
            )));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(WorkItemRepositoryError::NotFound(WorkItemRef::task(
                task.id(),
            )));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> WorkItemRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_story(&self, story: StoryId) -> WorkItemRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.story() == story)
            .cloned()
            .collect())
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> WorkItemRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| {
                !task.status().is_terminal() && task.due_date().is_some_and(|due| due < now)
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, id: TaskId) -> WorkItemRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.remove(&id).is_none() {
            return Err(WorkItemRepositoryError::NotFound(WorkItemRef::task(id)));
        }
        Ok(())
    }
}
