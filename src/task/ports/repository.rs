//! Repository port for task persistence.
//!
//! The board talks to whichever store is authoritative through this trait:
//! the remote task service, or a local blob store.

use crate::task::domain::{Task, TaskDomainError, TaskDraft, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every root task with its nested subtasks.
    async fn list_tasks(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Creates a root task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Invalid`] when the store rejects the
    /// draft.
    async fn create_task(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task>;

    /// Replaces the stored task sharing `task`'s identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_task(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Deletes a task together with its subtree.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete_task(&self, id: &TaskId) -> TaskRepositoryResult<()>;

    /// Returns the direct subtasks of `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the parent does not
    /// exist.
    async fn list_subtasks(&self, parent_id: &TaskId) -> TaskRepositoryResult<Vec<Task>>;

    /// Creates a subtask under `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the parent does not
    /// exist.
    async fn create_subtask(
        &self,
        parent_id: &TaskId,
        draft: &TaskDraft,
    ) -> TaskRepositoryResult<Task>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task failed validation.
    #[error(transparent)]
    Invalid(#[from] TaskDomainError),

    /// The task service could not be reached.
    #[error("network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The task service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body, or a placeholder when it was empty.
        message: String,
    },

    /// The task service answered with a body that could not be decoded.
    #[error("malformed response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),

    /// Local persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a transport failure.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Builds an HTTP status error, substituting `Unknown error` for an
    /// empty body.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        let text: String = body.into();
        let message = if text.trim().is_empty() {
            "Unknown error".to_owned()
        } else {
            text
        };
        Self::Http { status, message }
    }

    /// Wraps a response decoding failure.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
