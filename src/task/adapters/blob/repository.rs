//! Task repository persisting the whole tree through a [`BlobStore`].

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::debug;

use crate::task::{
    adapters::forest::TaskForest,
    domain::{Task, TaskDraft, TaskId},
    ports::{BlobStore, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Task repository that stores the full tree as a single JSON document.
///
/// Every write reads the current blob, edits the tree, and saves it back.
/// Writes through one repository value are serialized; separate
/// repositories sharing a store are not coordinated.
pub struct BlobTaskRepository<S: BlobStore, C: Clock> {
    store: S,
    key: String,
    clock: C,
    write_lock: Mutex<()>,
}

impl<S: BlobStore, C: Clock> BlobTaskRepository<S, C> {
    /// Creates a repository using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: S, clock: C) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY, clock)
    }

    /// Creates a repository storing its tree under `key`.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>, clock: C) -> Self {
        Self {
            store,
            key: key.into(),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    async fn read_forest(&self) -> TaskRepositoryResult<TaskForest> {
        let Some(blob) = self
            .store
            .load(&self.key)
            .await
            .map_err(TaskRepositoryError::persistence)?
        else {
            return Ok(TaskForest::default());
        };
        serde_json::from_slice(&blob).map_err(TaskRepositoryError::persistence)
    }

    async fn write_forest(&self, forest: &TaskForest) -> TaskRepositoryResult<()> {
        let blob = serde_json::to_vec(forest).map_err(TaskRepositoryError::persistence)?;
        self.store
            .save(&self.key, blob)
            .await
            .map_err(TaskRepositoryError::persistence)
    }

    /// Runs one read-modify-write cycle while holding the write lock.
    async fn modify<T>(
        &self,
        edit: impl FnOnce(&mut TaskForest) -> TaskRepositoryResult<T> + Send,
    ) -> TaskRepositoryResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut forest = self.read_forest().await?;
        let outcome = edit(&mut forest)?;
        self.write_forest(&forest).await?;
        Ok(outcome)
    }
}

#[async_trait]
impl<S, C> TaskRepository for BlobTaskRepository<S, C>
where
    S: BlobStore,
    C: Clock + Send + Sync,
{
    async fn list_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.read_forest().await?.roots())
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let today = self.clock.utc().date_naive();
        let task = self
            .modify(|forest| Ok(forest.insert_root(draft, today)))
            .await?;
        debug!(key = %self.key, task_id = %task.id(), "saved root task");
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> TaskRepositoryResult<Task> {
        self.modify(|forest| forest.update(task)).await
    }

    async fn delete_task(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.modify(|forest| forest.remove(id)).await
    }

    async fn list_subtasks(&self, parent_id: &TaskId) -> TaskRepositoryResult<Vec<Task>> {
        self.read_forest().await?.children(parent_id)
    }

    async fn create_subtask(
        &self,
        parent_id: &TaskId,
        draft: &TaskDraft,
    ) -> TaskRepositoryResult<Task> {
        let today = self.clock.utc().date_naive();
        let task = self
            .modify(|forest| forest.insert_child(parent_id, draft, today))
            .await?;
        debug!(key = %self.key, task_id = %task.id(), parent_id = %parent_id, "saved subtask");
        Ok(task)
    }
}
