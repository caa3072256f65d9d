//! Drag-and-drop moves within and across status columns.

use super::{Status, Task, TaskId};
use std::sync::Arc;

/// Position of a card: its column and its index within that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSlot {
    /// Column.
    pub status: Status,
    /// Index within the column.
    pub index: usize,
}

impl BoardSlot {
    /// Creates a slot.
    #[must_use]
    pub const fn new(status: Status, index: usize) -> Self {
        Self { status, index }
    }
}

/// A completed drag gesture reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Dragged task.
    pub task_id: TaskId,
    /// Where the drag started.
    pub source: BoardSlot,
    /// Where the card was dropped.
    pub destination: BoardSlot,
}

impl MoveRequest {
    /// Creates a move request.
    #[must_use]
    pub const fn new(task_id: TaskId, source: BoardSlot, destination: BoardSlot) -> Self {
        Self {
            task_id,
            source,
            destination,
        }
    }

    /// Returns `true` when the card was dropped where it was picked up.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}

/// The displayed list after a move, and the moved task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// Reordered task list.
    pub tasks: Vec<Arc<Task>>,
    /// The moved task carrying its new status.
    pub moved: Arc<Task>,
}

/// Computes the list that results from applying `request` to `displayed`.
///
/// Returns `None` when nothing should happen: the card was dropped where it
/// started, or the dragged task is not part of `displayed` (a stale drag).
///
/// Statuses may interleave in one flat list. The task is removed, given the
/// destination status, and inserted at the position of the first task of
/// the destination bucket plus the destination index. The offset is clamped
/// to the bucket size, and a task dropped on an empty bucket goes to the end.
#[must_use]
pub fn plan_move(displayed: &[Arc<Task>], request: &MoveRequest) -> Option<PlannedMove> {
    if request.is_noop() {
        return None;
    }
    let position = displayed
        .iter()
        .position(|task| *task.id() == request.task_id)?;

    let mut tasks = displayed.to_vec();
    let removed = tasks.remove(position);
    let destination = request.destination.status;
    let moved = Arc::new(removed.as_ref().clone().with_status(destination));

    let bucket_size = tasks
        .iter()
        .filter(|task| task.status() == destination)
        .count();
    let insert_at = tasks
        .iter()
        .position(|task| task.status() == destination)
        .map_or(tasks.len(), |first| {
            first + request.destination.index.min(bucket_size)
        });

    tasks.insert(insert_at, Arc::clone(&moved));
    Some(PlannedMove { tasks, moved })
}
