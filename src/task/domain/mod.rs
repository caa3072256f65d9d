//! Domain model for the task board.
//!
//! Tasks form a tree: every task owns an ordered list of subtasks, each a
//! full task. The domain provides the copy-on-write edits over that tree,
//! the breadcrumb path used to drill into sub-boards, and the column move
//! planner used by drag-and-drop. Nothing here performs I/O.

mod draft;
mod error;
mod ids;
mod path;
mod reorder;
mod task;
mod tree;
mod wire;

pub use draft::TaskDraft;
pub use error::{ParsePriorityError, ParseStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use path::{Breadcrumb, PathTarget, TaskPath, resolve};
pub use reorder::{BoardSlot, MoveRequest, PlannedMove, plan_move};
pub use task::{Priority, Status, Task};
pub use tree::{
    append_root, apply_to_task, contains_task, count_tasks, find_task, remove_root, remove_task,
    replace_root, replace_task, sort_by_priority, tasks_by_status,
};
