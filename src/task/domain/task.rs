//! Task aggregate and the kanban vocabulary it is sorted by.

use super::{
    ParsePriorityError, ParseStatusError, TaskDomainError, TaskDraft, TaskId, TaskTitle, wire,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Task urgency. Orders `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Board column a task is shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started.
    #[default]
    Backlog,
    /// In progress.
    Active,
    /// Done.
    Finished,
}

impl Status {
    /// Every column, in board order.
    pub const ALL: [Self; 3] = [Self::Backlog, Self::Active, Self::Finished];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Status {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// A task and the subtree of subtasks it owns.
///
/// Tasks are immutable values: every `with_*` method returns a new task.
/// Subtasks are held behind [`Arc`] so that rebuilding one branch of a tree
/// shares every untouched subtree with the previous version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: Status,
    #[serde(with = "wire::calendar_date")]
    start_date: NaiveDate,
    #[serde(default, with = "wire::optional_calendar_date")]
    due_date: Option<NaiveDate>,
    #[serde(default, with = "wire::optional_clock_time")]
    due_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "wire::nullable_list")]
    sub_tasks: Vec<Arc<Task>>,
}

impl Task {
    /// Creates a leaf task from a validated draft.
    ///
    /// `today` is used as the start date when the draft does not carry one.
    #[must_use]
    pub fn new(id: TaskId, draft: TaskDraft, today: NaiveDate) -> Self {
        let TaskDraft {
            title,
            description,
            priority,
            status,
            start_date,
            due_date,
            due_time,
        } = draft;
        Self {
            id,
            title,
            description,
            priority,
            status,
            start_date: start_date.unwrap_or(today),
            due_date,
            due_time,
            sub_tasks: Vec::new(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the column the task belongs to.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the due time, if any.
    #[must_use]
    pub const fn due_time(&self) -> Option<NaiveTime> {
        self.due_time
    }

    /// Returns the deadline when both the due date and due time are set.
    #[must_use]
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.due_date.zip(self.due_time).map(|(date, time)| date.and_time(time))
    }

    /// Returns the direct subtasks in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[Arc<Self>] {
        &self.sub_tasks
    }

    /// Returns `true` when the task owns at least one subtask.
    #[must_use]
    pub fn has_subtasks(&self) -> bool {
        !self.sub_tasks.is_empty()
    }

    /// Returns a copy with a new title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = title;
        self
    }

    /// Returns a copy with a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns a copy with a new priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns a copy moved to another column.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy with a new deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueTimeWithoutDate`] for a time without a
    /// date and [`TaskDomainError::DueBeforeStart`] when the due date precedes
    /// the start date.
    pub fn with_due(
        mut self,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Result<Self, TaskDomainError> {
        super::draft::validate_due(Some(self.start_date), due_date, due_time)?;
        self.due_date = due_date;
        self.due_time = due_time;
        Ok(self)
    }

    /// Returns a copy owning exactly `subtasks`.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: Vec<Arc<Self>>) -> Self {
        self.sub_tasks = subtasks;
        self
    }

    /// Returns a copy with `subtask` appended to the subtask list.
    #[must_use]
    pub fn with_appended_subtask(&self, subtask: Self) -> Self {
        let mut next = self.clone();
        next.sub_tasks.push(Arc::new(subtask));
        next
    }

    /// Returns a copy where the direct subtask sharing `subtask`'s id is
    /// replaced. Other subtasks stay shared.
    #[must_use]
    pub fn with_replaced_subtask(&self, subtask: Self) -> Self {
        let mut replacement = Some(subtask);
        let sub_tasks = self
            .sub_tasks
            .iter()
            .map(|existing| match replacement.take_if(|next| next.id == existing.id) {
                Some(next) => Arc::new(next),
                None => Arc::clone(existing),
            })
            .collect();
        Self {
            sub_tasks,
            ..self.clone()
        }
    }

    /// Returns a copy without the direct subtask identified by `id`.
    #[must_use]
    pub fn without_subtask(&self, id: &TaskId) -> Self {
        let sub_tasks = self
            .sub_tasks
            .iter()
            .filter(|existing| existing.id != *id)
            .cloned()
            .collect();
        Self {
            sub_tasks,
            ..self.clone()
        }
    }

    /// Returns a copy with every field except the subtree taken from
    /// `fields`.
    #[must_use]
    pub fn with_fields_of(&self, fields: &Self) -> Self {
        Self {
            sub_tasks: self.sub_tasks.clone(),
            ..fields.clone()
        }
    }
}
