//! Store-side task tree shared by the local adapters.
//!
//! Local adapters play the role of the task service: they assign
//! identifiers, fill in defaults, and locate tasks anywhere in the tree by
//! identifier alone.

use crate::task::{
    domain::{self, Task, TaskDraft, TaskId},
    ports::{TaskRepositoryError, TaskRepositoryResult},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Root task list as held by a local store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct TaskForest {
    roots: Vec<Arc<Task>>,
}

impl TaskForest {
    pub(crate) fn roots(&self) -> Vec<Task> {
        detach(&self.roots)
    }

    pub(crate) fn insert_root(&mut self, draft: &TaskDraft, today: NaiveDate) -> Task {
        let task = Task::new(TaskId::generate(), draft.clone(), today);
        self.roots = domain::append_root(&self.roots, task.clone());
        task
    }

    pub(crate) fn insert_child(
        &mut self,
        parent_id: &TaskId,
        draft: &TaskDraft,
        today: NaiveDate,
    ) -> TaskRepositoryResult<Task> {
        if !domain::contains_task(&self.roots, parent_id) {
            return Err(TaskRepositoryError::NotFound(parent_id.clone()));
        }
        let task = Task::new(TaskId::generate(), draft.clone(), today);
        let child = task.clone();
        self.roots = domain::apply_to_task(&self.roots, parent_id, |parent| {
            parent.with_appended_subtask(child)
        });
        Ok(task)
    }

    pub(crate) fn update(&mut self, task: &Task) -> TaskRepositoryResult<Task> {
        let next = domain::replace_task(&self.roots, task)
            .ok_or_else(|| TaskRepositoryError::NotFound(task.id().clone()))?;
        self.roots = next;
        domain::find_task(&self.roots, task.id())
            .map(|stored| stored.as_ref().clone())
            .ok_or_else(|| TaskRepositoryError::NotFound(task.id().clone()))
    }

    pub(crate) fn remove(&mut self, id: &TaskId) -> TaskRepositoryResult<()> {
        let next = domain::remove_task(&self.roots, id)
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
        self.roots = next;
        Ok(())
    }

    pub(crate) fn children(&self, parent_id: &TaskId) -> TaskRepositoryResult<Vec<Task>> {
        domain::find_task(&self.roots, parent_id)
            .map(|parent| detach(parent.subtasks()))
            .ok_or_else(|| TaskRepositoryError::NotFound(parent_id.clone()))
    }
}

fn detach(tasks: &[Arc<Task>]) -> Vec<Task> {
    tasks.iter().map(|task| task.as_ref().clone()).collect()
}
