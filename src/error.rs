//! Error types for timeline layout, dependency validation and rescheduling.
//!
//! Each component reports its own typed failure. [`EngineError`] wraps all
//! of them for callers that drive several components in one place.

use chrono::NaiveDate;
use thiserror::Error;

/// Timeline layout failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// A date range ends before it starts.
    #[error("invalid range for '{id}': {end} is before {start}")]
    InvalidRange {
        /// Project or task ID owning the range.
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// The project window is zero days long.
    #[error("project '{0}' spans zero days")]
    ZeroSpan(String),
}

/// Dependency graph failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The dependency relation contains a cycle.
    #[error("dependency cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    /// A task depends on an ID that is not in the task list.
    #[error("task '{task_id}' depends on unknown task '{missing_id}'")]
    UnknownDependency { task_id: String, missing_id: String },

    /// Two tasks share an ID.
    #[error("duplicate task id '{0}'")]
    DuplicateTask(String),

    /// A query named a task the graph does not contain.
    #[error("unknown task '{0}'")]
    UnknownTask(String),
}

/// Reasons a reschedule request is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RescheduleRejection {
    /// The booking does not allow rescheduling.
    #[error("booking '{0}' cannot be rescheduled")]
    NotReschedulable(String),

    /// The requested date/time is not among the booking's slots.
    #[error("slot {date} {time} is not available")]
    SlotUnavailable { date: NaiveDate, time: String },

    /// No reason code was supplied.
    #[error("a reschedule reason is required")]
    MissingReason,

    /// The reason code is outside the recognized set.
    #[error("unknown reason code '{0}'")]
    UnknownReasonCode(String),

    /// The initiator is outside the recognized set.
    #[error("unknown initiator '{0}'")]
    UnknownInitiator(String),

    /// Moving the booking would push its end past the last representable date.
    #[error("booking '{booking}' cannot keep its length when moved to {date}")]
    DateOutOfRange { booking: String, date: NaiveDate },

    /// The request targets a different booking.
    #[error("request for booking '{requested}' submitted against '{booking}'")]
    BookingMismatch { booking: String, requested: String },

    /// The request state machine was driven out of order.
    #[error("invalid reschedule transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl RescheduleRejection {
    /// Short human-readable category for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotReschedulable(_) => "This job cannot be rescheduled",
            Self::SlotUnavailable { .. } => "The selected time slot is no longer available",
            Self::MissingReason => "Please select a reason for rescheduling",
            Self::UnknownReasonCode(_) => "Please select a valid reason for rescheduling",
            Self::UnknownInitiator(_) => "Please specify who requested the change",
            Self::DateOutOfRange { .. } => "The selected date is out of range",
            Self::BookingMismatch { .. } | Self::InvalidTransition { .. } => {
                "Something went wrong while rescheduling this job"
            }
        }
    }
}

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Umbrella error for callers driving several components.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("dependency error: {0}")]
    Graph(#[from] GraphError),

    #[error("reschedule rejected: {0}")]
    Reschedule(#[from] RescheduleRejection),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
