//! Input validation for projects and bookings.
//!
//! Checks structural integrity of data handed over by the loading layer
//! before layout or rescheduling. Unlike the component operations, which
//! stop at the first failure, these checks collect every issue. Detects:
//! - Duplicate task IDs
//! - Reversed project windows and task ranges
//! - Progress outside 0..=100
//! - Self and unknown dependencies
//! - Locked bookings that still offer slots
//! - Repeated booking slots
//!
//! Tasks outside the project window are not reported; layout clips them.
//! Cycles are reported by [`DependencyGraph::build`](crate::dependency::DependencyGraph::build).

use crate::models::{Booking, Project};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Project window ends before it starts.
    InvalidProjectWindow,
    /// Task ends before it starts.
    InvalidDateRange,
    /// Task progress is outside 0..=100.
    ProgressOutOfRange,
    /// Task lists itself as a dependency.
    SelfDependency,
    /// Task references a dependency that doesn't exist.
    InvalidDependency,
    /// Booking forbids rescheduling but still lists slots.
    LockedWithSlots,
    /// Booking lists the same slot twice.
    DuplicateSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a project and its tasks.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_project(project: &Project) -> ValidationResult {
    let mut errors = Vec::new();

    if project.end_date < project.start_date {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidProjectWindow,
            format!(
                "Project '{}' ends {} before it starts {}",
                project.id, project.end_date, project.start_date
            ),
        ));
    }

    let mut task_ids = HashSet::new();
    for task in &project.tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if !task.has_valid_range() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDateRange,
                format!(
                    "Task '{}' ends {} before it starts {}",
                    task.id, task.end_date, task.start_date
                ),
            ));
        }

        if !(0..=100).contains(&task.progress) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ProgressOutOfRange,
                format!("Task '{}' has progress {}%", task.id, task.progress),
            ));
        }

        if task.depends_on_itself() {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfDependency,
                format!("Task '{}' depends on itself", task.id),
            ));
        }
    }

    for task in &project.tasks {
        for dep in &task.dependencies {
            if !task_ids.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDependency,
                    format!("Task '{}' references unknown dependency '{}'", task.id, dep),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a booking's slot catalog.
pub fn validate_booking(booking: &Booking) -> ValidationResult {
    let mut errors = Vec::new();

    if !booking.can_reschedule && !booking.available_slots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::LockedWithSlots,
            format!(
                "Booking '{}' cannot be rescheduled but lists {} slot(s)",
                booking.id,
                booking.available_slots.len()
            ),
        ));
    }

    let mut seen = HashSet::new();
    for slot in &booking.available_slots {
        if !seen.insert(slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("Booking '{}' lists {} {} twice", booking.id, slot.date, slot.time),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
