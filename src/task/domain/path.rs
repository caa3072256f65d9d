//! Breadcrumb navigation into nested sub-boards.

use super::{Task, TaskId, TaskTitle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One step of the drill-down path.
///
/// The title is a snapshot taken when the user navigated into the task and
/// is not refreshed when the task is renamed later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    id: TaskId,
    title: TaskTitle,
}

impl Breadcrumb {
    /// Captures the identity and current title of `task`.
    #[must_use]
    pub fn of(task: &Task) -> Self {
        Self {
            id: task.id().clone(),
            title: task.title().clone(),
        }
    }

    /// Returns the identifier of the task this breadcrumb points at.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title captured at navigation time.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }
}

/// Where a breadcrumb click should take the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTarget {
    /// The root task list ("All Tasks").
    Root,
    /// The sub-board of the breadcrumb at this index.
    Breadcrumb(usize),
}

impl PathTarget {
    /// Maps a breadcrumb index where any negative value stands for the root.
    #[must_use]
    pub fn from_index(index: isize) -> Self {
        usize::try_from(index).map_or(Self::Root, Self::Breadcrumb)
    }
}

/// Ordered drill-down path from the root list to the viewed sub-board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskPath {
    crumbs: Vec<Breadcrumb>,
}

impl TaskPath {
    /// Creates a path that points at the root list.
    #[must_use]
    pub const fn root() -> Self {
        Self { crumbs: Vec::new() }
    }

    /// Returns `true` when the path points at the root list.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Returns the number of breadcrumbs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    /// Returns `true` when there are no breadcrumbs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Returns the breadcrumbs from the outermost to the innermost.
    #[must_use]
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.crumbs
    }

    /// Returns the innermost breadcrumb, i.e. the task whose subtasks are
    /// being viewed.
    #[must_use]
    pub fn last(&self) -> Option<&Breadcrumb> {
        self.crumbs.last()
    }

    /// Descends into `task`'s sub-board and returns its subtasks, which are
    /// the new view.
    pub fn push(&mut self, task: &Task) -> Vec<Arc<Task>> {
        self.crumbs.push(Breadcrumb::of(task));
        task.subtasks().to_vec()
    }

    /// Returns a copy extended by `task`.
    #[must_use]
    pub fn pushed(&self, task: &Task) -> Self {
        let mut next = self.clone();
        next.crumbs.push(Breadcrumb::of(task));
        next
    }

    /// Cuts the path back to `target`.
    ///
    /// `Breadcrumb(i)` keeps breadcrumbs `0..=i`; an index past the end leaves
    /// the path unchanged. `Root` clears it.
    pub fn truncate_to(&mut self, target: PathTarget) {
        match target {
            PathTarget::Root => self.crumbs.clear(),
            PathTarget::Breadcrumb(index) => self.crumbs.truncate(index.saturating_add(1)),
        }
    }

    /// Resolves this path against `tree`. See [`resolve`].
    #[must_use]
    pub fn resolve(&self, tree: &[Arc<Task>]) -> Vec<Arc<Task>> {
        resolve(tree, &self.crumbs)
    }
}

impl FromIterator<Breadcrumb> for TaskPath {
    fn from_iter<I: IntoIterator<Item = Breadcrumb>>(iter: I) -> Self {
        Self {
            crumbs: iter.into_iter().collect(),
        }
    }
}

/// Walks `path` through `tree` and returns the task list it points at.
///
/// Each breadcrumb is looked up among the tasks reached so far, starting with
/// the roots, and the walk descends into the match's subtasks. If a step has
/// no match the result is empty: a stale path shows an empty board instead
/// of failing. An empty path yields the whole root list.
#[must_use]
pub fn resolve(tree: &[Arc<Task>], path: &[Breadcrumb]) -> Vec<Arc<Task>> {
    let mut current = tree;
    for crumb in path {
        match current.iter().find(|task| task.id() == crumb.id()) {
            Some(task) => current = task.subtasks(),
            None => return Vec::new(),
        }
    }
    current.to_vec()
}
