//! Board coordination: user intents against the task tree and its store.
//!
//! [`BoardService`] owns the authoritative tree, the breadcrumb path and the
//! resolved list the user is looking at. Each intent calls the repository
//! first and only then rewrites the tree, except drag-and-drop, which is
//! applied optimistically and rolled back when the store rejects it.
//!
//! State sits behind a lock that is never held across an `.await`. A
//! handler captures what it needs before calling the repository and, once
//! the call returns, applies its change to whatever tree and path are
//! current at that point.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::task::{
    domain::{
        self, Breadcrumb, MoveRequest, PathTarget, PlannedMove, Status, Task, TaskDraft, TaskId,
        TaskPath,
    },
    ports::{TaskRepository, TaskRepositoryError},
};

/// User-facing name of a board operation, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOperation {
    /// Initial load of the root list.
    LoadTasks,
    /// Adding a task to the viewed list.
    CreateTask,
    /// Editing a task in the viewed list.
    UpdateTask,
    /// Deleting a task from the viewed list.
    DeleteTask,
    /// Fetching a task's subtasks before drilling into it.
    LoadSubtasks,
    /// Persisting a drag-and-drop move.
    UpdateTaskStatus,
}

impl BoardOperation {
    /// Returns the operation as it appears in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadTasks => "load tasks",
            Self::CreateTask => "create task",
            Self::UpdateTask => "update task",
            Self::DeleteTask => "delete task",
            Self::LoadSubtasks => "load subtasks",
            Self::UpdateTaskStatus => "update task status",
        }
    }
}

impl fmt::Display for BoardOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board intent failed because the repository rejected it.
#[derive(Debug, Clone, Error)]
#[error("Failed to {operation}: {source}")]
pub struct BoardError {
    operation: BoardOperation,
    #[source]
    source: TaskRepositoryError,
}

impl BoardError {
    /// Returns the failed operation.
    #[must_use]
    pub const fn operation(&self) -> BoardOperation {
        self.operation
    }

    /// Returns the repository error.
    #[must_use]
    pub const fn repository_error(&self) -> &TaskRepositoryError {
        &self.source
    }
}

/// Result type for board intents.
pub type BoardResult<T> = Result<T, BoardError>;

/// What a drag-and-drop gesture did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The card was dropped where it started, or is not on the viewed board.
    Ignored,
    /// The card moved and the store accepted its new status.
    Moved(Arc<Task>),
}

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    /// Tasks of the viewed list, in board order.
    pub current_tasks: Vec<Arc<Task>>,
    /// Path from the root list to the viewed list.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Message of the last failed intent, if any.
    pub error: Option<String>,
}

impl BoardView {
    /// Returns one column, highest priority first.
    #[must_use]
    pub fn column(&self, status: Status) -> Vec<Arc<Task>> {
        domain::sort_by_priority(&domain::tasks_by_status(&self.current_tasks, status))
    }
}

#[derive(Debug, Default)]
struct BoardState {
    tasks: Vec<Arc<Task>>,
    path: TaskPath,
    current: Vec<Arc<Task>>,
    error: Option<String>,
}

impl BoardState {
    fn refresh(&mut self) {
        self.current = self.path.resolve(&self.tasks);
    }

    /// Shows `viewed` and writes it back to where the viewed list lives in
    /// the tree: the root list, or the subtasks of the last breadcrumb.
    fn replace_viewed(&mut self, viewed: Vec<Arc<Task>>) {
        self.tasks = match self.path.last() {
            None => viewed.clone(),
            Some(parent) => domain::apply_to_task(&self.tasks, parent.id(), |task| {
                task.clone().with_subtasks(viewed.clone())
            }),
        };
        self.current = viewed;
    }
}

/// Coordinates the task tree, the breadcrumb path and the repository.
pub struct BoardService<R>
where
    R: TaskRepository + ?Sized,
{
    repository: Arc<R>,
    state: Arc<RwLock<BoardState>>,
}

impl<R> Clone for BoardService<R>
where
    R: TaskRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R> BoardService<R>
where
    R: TaskRepository + ?Sized,
{
    /// Creates an empty board backed by `repository`.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            state: Arc::default(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clears the previous error and returns the path the intent starts
    /// from.
    fn begin(&self) -> TaskPath {
        let mut state = self.write();
        state.error = None;
        state.path.clone()
    }

    /// Like [`Self::begin`], returning the parent of the viewed list.
    fn begin_in_parent(&self) -> Option<TaskId> {
        self.begin().last().map(|crumb| crumb.id().clone())
    }

    fn fail(&self, operation: BoardOperation, source: TaskRepositoryError) -> BoardError {
        let error = BoardError { operation, source };
        warn!(%operation, error = %error.source, "board operation failed");
        self.write().error = Some(error.to_string());
        error
    }

    /// Returns the current view state.
    #[must_use]
    pub fn view(&self) -> BoardView {
        let state = self.read();
        BoardView {
            current_tasks: state.current.clone(),
            breadcrumbs: state.path.breadcrumbs().to_vec(),
            error: state.error.clone(),
        }
    }

    /// Returns the authoritative root list.
    #[must_use]
    pub fn tasks(&self) -> Vec<Arc<Task>> {
        self.read().tasks.clone()
    }

    /// Returns the viewed list.
    #[must_use]
    pub fn current_tasks(&self) -> Vec<Arc<Task>> {
        self.read().current.clone()
    }

    /// Returns the breadcrumb path.
    #[must_use]
    pub fn path(&self) -> TaskPath {
        self.read().path.clone()
    }

    /// Returns the message of the last failed intent.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Returns the viewed tasks with `status`, in board order.
    #[must_use]
    pub fn tasks_by_status(&self, status: Status) -> Vec<Arc<Task>> {
        domain::tasks_by_status(&self.read().current, status)
    }

    /// Loads the root list from the repository and re-resolves the path.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the repository cannot list tasks; the board
    /// keeps its previous tree.
    pub async fn load(&self) -> BoardResult<()> {
        self.begin();
        let loaded = self
            .repository
            .list_tasks()
            .await
            .map_err(|err| self.fail(BoardOperation::LoadTasks, err))?;

        let mut state = self.write();
        state.tasks = loaded.into_iter().map(Arc::new).collect();
        state.refresh();
        info!(
            roots = state.tasks.len(),
            total = domain::count_tasks(&state.tasks),
            "loaded board"
        );
        Ok(())
    }

    /// Creates a task in the viewed list: a root task at the root, otherwise
    /// a subtask of the last breadcrumb.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the repository rejects the task.
    pub async fn add_task(&self, draft: TaskDraft) -> BoardResult<Arc<Task>> {
        let parent = self.begin_in_parent();
        let stored = match &parent {
            None => self.repository.create_task(&draft).await,
            Some(parent_id) => self.repository.create_subtask(parent_id, &draft).await,
        }
        .map_err(|err| self.fail(BoardOperation::CreateTask, err))?;

        let created = Arc::new(stored);
        let mut state = self.write();
        state.tasks = match &parent {
            None => {
                let mut roots = state.tasks.clone();
                roots.push(Arc::clone(&created));
                roots
            }
            Some(parent_id) => domain::apply_to_task(&state.tasks, parent_id, |task| {
                task.with_appended_subtask(created.as_ref().clone())
            }),
        };
        state.refresh();
        debug!(task_id = %created.id(), parent_id = ?parent, "added task");
        Ok(created)
    }

    /// Saves an edited task and places it in the viewed list.
    ///
    /// The edited value replaces the local node as given, subtree included.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the repository rejects the update; the
    /// tree is left untouched.
    pub async fn update_task(&self, task: Task) -> BoardResult<()> {
        let parent = self.begin_in_parent();
        self.repository
            .update_task(&task)
            .await
            .map_err(|err| self.fail(BoardOperation::UpdateTask, err))?;

        let task_id = task.id().clone();
        let mut state = self.write();
        state.tasks = match &parent {
            None => domain::replace_root(&state.tasks, task),
            Some(parent_id) => domain::apply_to_task(&state.tasks, parent_id, |stored| {
                stored.with_replaced_subtask(task)
            }),
        };
        state.refresh();
        debug!(%task_id, "updated task");
        Ok(())
    }

    /// Deletes a task of the viewed list together with its subtree.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the repository rejects the deletion.
    pub async fn delete_task(&self, id: &TaskId) -> BoardResult<()> {
        let parent = self.begin_in_parent();
        self.repository
            .delete_task(id)
            .await
            .map_err(|err| self.fail(BoardOperation::DeleteTask, err))?;

        let mut state = self.write();
        state.tasks = match &parent {
            None => domain::remove_root(&state.tasks, id),
            Some(parent_id) => domain::apply_to_task(&state.tasks, parent_id, |stored| {
                stored.without_subtask(id)
            }),
        };
        state.refresh();
        debug!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Drills into `task`'s sub-board.
    ///
    /// The subtasks are fetched from the repository and grafted into the
    /// tree. The breadcrumb is then pushed onto the path the call started
    /// from, replacing any navigation that finished in the meantime, and the
    /// viewed list is resolved from that path.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the subtasks cannot be fetched; path and
    /// view stay where they were.
    pub async fn navigate_into(&self, task: &Task) -> BoardResult<()> {
        let origin = self.begin();
        let fetched = self
            .repository
            .list_subtasks(task.id())
            .await
            .map_err(|err| self.fail(BoardOperation::LoadSubtasks, err))?;

        let subtasks: Vec<Arc<Task>> = fetched.into_iter().map(Arc::new).collect();
        let mut state = self.write();
        state.tasks = domain::apply_to_task(&state.tasks, task.id(), |stored| {
            stored.clone().with_subtasks(subtasks)
        });
        state.path = origin.pushed(task);
        state.refresh();
        debug!(task_id = %task.id(), depth = state.path.len(), "navigated into task");
        Ok(())
    }

    /// Jumps back to a breadcrumb, or to the root list.
    pub fn navigate_to(&self, target: PathTarget) {
        let mut state = self.write();
        state.error = None;
        state.path.truncate_to(target);
        state.refresh();
        debug!(depth = state.path.len(), "navigated to breadcrumb");
    }

    /// Applies a drag-and-drop move to the viewed list and persists the
    /// moved task's new status.
    ///
    /// The move shows immediately. If the repository rejects it, the tree
    /// goes back to its state before the move and the viewed list is
    /// resolved again from whatever path is current by then.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the repository rejects the new status.
    pub async fn move_task(&self, request: MoveRequest) -> BoardResult<MoveOutcome> {
        let (snapshot, moved) = {
            let mut state = self.write();
            state.error = None;
            let Some(PlannedMove { tasks, moved }) = domain::plan_move(&state.current, &request)
            else {
                debug!(task_id = %request.task_id, "ignored move");
                return Ok(MoveOutcome::Ignored);
            };
            let snapshot = state.tasks.clone();
            state.replace_viewed(tasks);
            (snapshot, moved)
        };

        match self.repository.update_task(&moved).await {
            Ok(_) => {
                debug!(task_id = %moved.id(), status = %moved.status(), "moved task");
                Ok(MoveOutcome::Moved(moved))
            }
            Err(err) => {
                {
                    let mut state = self.write();
                    state.tasks = snapshot;
                    state.refresh();
                }
                Err(self.fail(BoardOperation::UpdateTaskStatus, err))
            }
        }
    }
}
