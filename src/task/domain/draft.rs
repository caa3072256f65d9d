//! Validated input for creating a task before an identifier is assigned.

use super::{Priority, Status, TaskDomainError, TaskTitle, wire};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A task that has not been persisted yet.
///
/// Serializes to the request body the task service expects for create
/// calls. An absent start date is left for the persistence adapter to fill
/// in with the creation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub(super) title: TaskTitle,
    pub(super) description: String,
    pub(super) priority: Priority,
    pub(super) status: Status,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "wire::optional_calendar_date"
    )]
    pub(super) start_date: Option<NaiveDate>,
    #[serde(with = "wire::optional_calendar_date")]
    pub(super) due_date: Option<NaiveDate>,
    #[serde(with = "wire::optional_clock_time")]
    pub(super) due_time: Option<NaiveTime>,
}

impl TaskDraft {
    /// Creates a backlog draft with medium priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: TaskTitle::new(title)?,
            description: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            start_date: None,
            due_date: None,
            due_time: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the column.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets an explicit start date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueBeforeStart`] when an already configured
    /// due date precedes `start_date`.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Result<Self, TaskDomainError> {
        validate_due(Some(start_date), self.due_date, self.due_time)?;
        self.start_date = Some(start_date);
        Ok(self)
    }

    /// Sets the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueTimeWithoutDate`] for a time without a
    /// date and [`TaskDomainError::DueBeforeStart`] when the due date precedes
    /// the configured start date.
    pub fn with_due(
        mut self,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Result<Self, TaskDomainError> {
        validate_due(self.start_date, due_date, due_time)?;
        self.due_date = due_date;
        self.due_time = due_time;
        Ok(self)
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the column.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the explicit start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
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
}

pub(super) fn validate_due(
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    due_time: Option<NaiveTime>,
) -> Result<(), TaskDomainError> {
    match (due_date, due_time) {
        (None, Some(_)) => Err(TaskDomainError::DueTimeWithoutDate),
        (Some(due), _) => match start_date {
            Some(start) if due < start => Err(TaskDomainError::DueBeforeStart { start, due }),
            _ => Ok(()),
        },
        (None, None) => Ok(()),
    }
}
