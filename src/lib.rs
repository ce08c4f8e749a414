//! Timeline and rescheduling engine for engineering-services projects.
//!
//! Turns project task lists into Gantt bar geometry, validates task
//! dependencies, and decides whether a confirmed job may move to a new
//! slot and at what fee. Storage, payment and rendering stay with the
//! caller; everything here is synchronous and works on in-memory values.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Project`, `Task`, `Booking`, `Slot`,
//!   `RescheduleRequest`, `RescheduleRecord`
//! - **`timeline`**: Bar offsets/widths and month markers for a project window
//! - **`dependency`**: Dependency DAG validation, topological order, readiness
//! - **`reschedule`**: Reschedule validation, state machine and flat fees
//! - **`validation`**: Collect-all integrity checks for loaded data
//! - **`config`**: TOML engine settings
//!
//! # Flow
//!
//! ```text
//! Project ─▶ DependencyGraph::build ─▶ TimelineLayout::for_project ─▶ renderer
//! Booking + RescheduleRequest ─▶ RescheduleManager ─▶ RescheduleRecord | rejection
//! ```
//!
//! # Logging
//!
//! Events are emitted through `tracing`; no subscriber is installed here.

pub mod config;
pub mod dependency;
pub mod error;
pub mod models;
pub mod reschedule;
pub mod timeline;
pub mod validation;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, GraphError, RescheduleRejection, TimelineError};
