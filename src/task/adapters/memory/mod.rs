//! In-memory task repository.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};
use tracing::debug;

use super::forest::TaskForest;
use crate::task::{
    domain::{Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Behaves like the task service: identifiers are UUID strings and drafts
/// without a start date start on the clock's current day.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository<C: Clock> {
    state: Arc<RwLock<TaskForest>>,
    clock: Arc<C>,
}

impl<C: Clock> InMemoryTaskRepository<C> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::default(),
            clock: Arc::new(clock),
        }
    }

    fn write_state<T>(
        &self,
        f: impl FnOnce(&mut TaskForest) -> TaskRepositoryResult<T>,
    ) -> TaskRepositoryResult<T> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        f(&mut state)
    }

    fn read_state<T>(
        &self,
        f: impl FnOnce(&TaskForest) -> TaskRepositoryResult<T>,
    ) -> TaskRepositoryResult<T> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        f(&state)
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> TaskRepository for InMemoryTaskRepository<C> {
    async fn list_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.read_state(|forest| Ok(forest.roots()))
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let today = self.clock.utc().date_naive();
        let task = self.write_state(|forest| Ok(forest.insert_root(draft, today)))?;
        debug!(task_id = %task.id(), "stored root task");
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> TaskRepositoryResult<Task> {
        self.write_state(|forest| forest.update(task))
    }

    async fn delete_task(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.write_state(|forest| forest.remove(id))
    }

    async fn list_subtasks(&self, parent_id: &TaskId) -> TaskRepositoryResult<Vec<Task>> {
        self.read_state(|forest| forest.children(parent_id))
    }

    async fn create_subtask(
        &self,
        parent_id: &TaskId,
        draft: &TaskDraft,
    ) -> TaskRepositoryResult<Task> {
        let today = self.clock.utc().date_naive();
        let task = self.write_state(|forest| forest.insert_child(parent_id, draft, today))?;
        debug!(task_id = %task.id(), parent_id = %parent_id, "stored subtask");
        Ok(task)
    }
}
