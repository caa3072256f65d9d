//! Copy-on-write edits over nested task trees.
//!
//! A tree is an ordered slice of root tasks, each owning its subtasks to any
//! depth. Every function here is pure and total: edits return a new root
//! sequence in which the nodes on the path from the root to the edited task
//! are fresh allocations and every other subtree is the same [`Arc`] as in
//! the input. Callers can therefore detect untouched branches with
//! [`Arc::ptr_eq`].
//!
//! Lookups are by identifier alone. Identifiers are expected to be unique
//! across the whole tree; when they are not, the first match in depth-first,
//! sequence order wins.

use super::{Status, Task, TaskId};
use std::cmp::Reverse;
use std::sync::Arc;

/// Applies `transform` to the task identified by `target` at any depth.
///
/// The transform receives the matched task and fully owns the shape of its
/// replacement. It should keep the identifier so the tree stays
/// addressable. When no task matches, the returned tree is equal to `tree`
/// and shares every root with it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use taskboard::task::domain::{Task, TaskDraft, TaskId, apply_to_task};
///
/// # fn main() -> Result<(), taskboard::task::domain::TaskDomainError> {
/// let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default();
/// let plan = Task::new(TaskId::from("1"), TaskDraft::new("Plan")?, today);
/// let outline = Task::new(TaskId::from("1-1"), TaskDraft::new("Outline")?, today);
///
/// let tree = vec![Arc::new(plan)];
/// let next = apply_to_task(&tree, &TaskId::from("1"), |task| {
///     task.with_appended_subtask(outline)
/// });
///
/// assert_eq!(next.first().map(|task| task.subtasks().len()), Some(1));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn apply_to_task<F>(tree: &[Arc<Task>], target: &TaskId, transform: F) -> Vec<Arc<Task>>
where
    F: FnOnce(&Task) -> Task,
{
    let mut pending = Some(transform);
    rewrite(tree, target, &mut pending).unwrap_or_else(|| tree.to_vec())
}

/// Rebuilds `tree` if `target` lives somewhere inside it.
///
/// Returns `None` when the target is absent so that callers keep sharing the
/// original sequence.
fn rewrite<F>(tree: &[Arc<Task>], target: &TaskId, pending: &mut Option<F>) -> Option<Vec<Arc<Task>>>
where
    F: FnOnce(&Task) -> Task,
{
    for (position, node) in tree.iter().enumerate() {
        let replacement = if node.id() == target {
            pending.take().map(|transform| transform(node.as_ref()))
        } else if node.has_subtasks() {
            rewrite(node.subtasks(), target, pending)
                .map(|subtasks| node.as_ref().clone().with_subtasks(subtasks))
        } else {
            None
        };

        if let Some(next) = replacement {
            let mut rebuilt = tree.to_vec();
            if let Some(slot) = rebuilt.get_mut(position) {
                *slot = Arc::new(next);
            }
            return Some(rebuilt);
        }
    }
    None
}

/// Finds the task identified by `id` at any depth.
#[must_use]
pub fn find_task<'a>(tree: &'a [Arc<Task>], id: &TaskId) -> Option<&'a Arc<Task>> {
    tree.iter().find_map(|node| {
        if node.id() == id {
            Some(node)
        } else {
            find_task(node.subtasks(), id)
        }
    })
}

/// Returns `true` when a task with `id` exists at any depth.
#[must_use]
pub fn contains_task(tree: &[Arc<Task>], id: &TaskId) -> bool {
    find_task(tree, id).is_some()
}

/// Replaces the stored fields of the task sharing `task`'s identifier while
/// keeping its stored subtree.
///
/// Returns `None` when no such task exists.
#[must_use]
pub fn replace_task(tree: &[Arc<Task>], task: &Task) -> Option<Vec<Arc<Task>>> {
    let mut pending = Some(|stored: &Task| stored.with_fields_of(task));
    rewrite(tree, task.id(), &mut pending)
}

/// Removes the task identified by `id`, together with its subtree, at any
/// depth.
///
/// Returns `None` when no such task exists.
#[must_use]
pub fn remove_task(tree: &[Arc<Task>], id: &TaskId) -> Option<Vec<Arc<Task>>> {
    if tree.iter().any(|node| node.id() == id) {
        return Some(remove_root(tree, id));
    }
    let parent = tree
        .iter()
        .find_map(|node| find_parent(node, id))?
        .id()
        .clone();
    Some(apply_to_task(tree, &parent, |task| task.without_subtask(id)))
}

fn find_parent<'a>(node: &'a Arc<Task>, id: &TaskId) -> Option<&'a Arc<Task>> {
    if node.subtasks().iter().any(|child| child.id() == id) {
        return Some(node);
    }
    node.subtasks().iter().find_map(|child| find_parent(child, id))
}

/// Appends a task to the root sequence.
#[must_use]
pub fn append_root(tree: &[Arc<Task>], task: Task) -> Vec<Arc<Task>> {
    let mut next = tree.to_vec();
    next.push(Arc::new(task));
    next
}

/// Replaces the root task sharing `task`'s identifier. Nested tasks are not
/// searched.
#[must_use]
pub fn replace_root(tree: &[Arc<Task>], task: Task) -> Vec<Arc<Task>> {
    let mut replacement = Some(task);
    tree.iter()
        .map(|node| match replacement.take_if(|next| next.id() == node.id()) {
            Some(next) => Arc::new(next),
            None => Arc::clone(node),
        })
        .collect()
}

/// Removes the root task identified by `id`. Nested tasks are not searched.
#[must_use]
pub fn remove_root(tree: &[Arc<Task>], id: &TaskId) -> Vec<Arc<Task>> {
    tree.iter().filter(|node| node.id() != id).cloned().collect()
}

/// Returns the tasks of one status bucket, keeping their relative order.
#[must_use]
pub fn tasks_by_status(tasks: &[Arc<Task>], status: Status) -> Vec<Arc<Task>> {
    tasks
        .iter()
        .filter(|task| task.status() == status)
        .cloned()
        .collect()
}

/// Orders a column for display: high before medium before low, stable
/// within one priority.
#[must_use]
pub fn sort_by_priority(tasks: &[Arc<Task>]) -> Vec<Arc<Task>> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| Reverse(task.priority()));
    sorted
}

/// Counts every task in the tree, subtasks included.
#[must_use]
pub fn count_tasks(tree: &[Arc<Task>]) -> usize {
    tree.iter()
        .map(|node| 1 + count_tasks(node.subtasks()))
        .sum()
}
