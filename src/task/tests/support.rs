//! Task tree builders shared by the unit tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::task::domain::{Priority, Status, Task, TaskDraft, TaskId};

pub(super) fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid date")
}

pub(super) fn leaf(id: &str, title: &str, status: Status) -> Task {
    let draft = TaskDraft::new(title)
        .expect("valid title")
        .with_status(status);
    Task::new(TaskId::from(id), draft, start_date())
}

pub(super) fn prioritized(id: &str, status: Status, priority: Priority) -> Task {
    let draft = TaskDraft::new(id)
        .expect("valid title")
        .with_status(status)
        .with_priority(priority);
    Task::new(TaskId::from(id), draft, start_date())
}

pub(super) fn node(id: &str, title: &str, status: Status, subtasks: Vec<Task>) -> Task {
    leaf(id, title, status).with_subtasks(subtasks.into_iter().map(Arc::new).collect())
}

pub(super) fn tree(tasks: Vec<Task>) -> Vec<Arc<Task>> {
    tasks.into_iter().map(Arc::new).collect()
}

pub(super) fn ids(tasks: &[Arc<Task>]) -> Vec<&str> {
    tasks.iter().map(|task| task.id().as_str()).collect()
}

/// `[1 "Plan" [1-1 "Outline", 1-2 "Draft" [1-2-1 "Intro"]], 2 "Ship"]`
pub(super) fn sample_tree() -> Vec<Arc<Task>> {
    tree(vec![
        node(
            "1",
            "Plan",
            Status::Backlog,
            vec![
                leaf("1-1", "Outline", Status::Backlog),
                node(
                    "1-2",
                    "Draft",
                    Status::Active,
                    vec![leaf("1-2-1", "Intro", Status::Backlog)],
                ),
            ],
        ),
        leaf("2", "Ship", Status::Active),
    ])
}

pub(super) fn child<'a>(task: &'a Arc<Task>, index: usize) -> &'a Arc<Task> {
    task.subtasks().get(index).expect("subtask exists")
}

pub(super) fn root(tree: &[Arc<Task>], index: usize) -> &Arc<Task> {
    tree.get(index).expect("root exists")
}
