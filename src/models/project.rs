//! Project model.
//!
//! A project owns the overall timeline window and an ordered task list.
//! Tasks are expected to fall inside the window, but layout clips rather
//! than rejects tasks that do not.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Task, TaskStatus};

/// A project with its timeline window and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// First day of the timeline window.
    pub start_date: NaiveDate,
    /// Last day of the timeline window.
    pub end_date: NaiveDate,
    /// Tasks in display order.
    pub tasks: Vec<Task>,
}

impl Project {
    /// Creates an empty project over the given window.
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            start_date,
            end_date,
            tasks: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Appends a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Looks up a task by ID.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks with the given status, in list order.
    pub fn tasks_with_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Mean clamped progress across all tasks (0 for an empty project).
    pub fn overall_progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.tasks.iter().map(|t| t.clamped_progress() as i64).sum();
        sum as f64 / self.tasks.len() as f64
    }

    /// Whether `task` lies entirely within the project window.
    pub fn contains(&self, task: &Task) -> bool {
        task.start_date >= self.start_date && task.end_date <= self.end_date
    }
}
