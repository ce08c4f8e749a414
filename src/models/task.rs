//! Task model.
//!
//! A task is one bar on a project timeline: a named date range with a
//! completion percentage, a status, and the IDs of the tasks it waits on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A task on a project timeline.
///
/// # Date Representation
/// `start_date` and `end_date` are calendar dates forming an inclusive range.
/// A well-formed task has `start_date <= end_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// First day of work.
    pub start_date: NaiveDate,
    /// Last day of work.
    pub end_date: NaiveDate,
    /// Percent complete. Expected 0..=100; consumers clamp.
    pub progress: i32,
    /// IDs of tasks that must be done before this one starts.
    pub dependencies: Vec<String>,
    /// Current status.
    pub status: TaskStatus,
}

impl Task {
    /// Creates a pending single-day task on `NaiveDate::MIN`.
    ///
    /// Set real dates with [`Task::with_dates`].
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            start_date: NaiveDate::MIN,
            end_date: NaiveDate::MIN,
            progress: 0,
            dependencies: Vec::new(),
            status: TaskStatus::Pending,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the date range.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Sets the progress percentage.
    pub fn with_progress(mut self, progress: i32) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds a dependency on another task.
    pub fn with_dependency(mut self, task_id: impl Into<String>) -> Self {
        self.dependencies.push(task_id.into());
        self
    }

    /// Progress clamped to 0..=100.
    #[inline]
    pub fn clamped_progress(&self) -> i32 {
        self.progress.clamp(0, 100)
    }

    /// Length of the range in days (`end - start`).
    #[inline]
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Whether the date range is well-formed.
    #[inline]
    pub fn has_valid_range(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Whether this task lists its own ID as a dependency.
    pub fn depends_on_itself(&self) -> bool {
        self.dependencies.iter().any(|d| d == &self.id)
    }
}
