//! Task dependency validation and queries.
//!
//! [`DependencyGraph::build`] checks that every referenced task exists and
//! that the relation is acyclic. A built graph answers ordering and
//! readiness questions.
//!
//! # Readiness
//!
//! Two rules are offered through [`ReadinessMode`]: status-based (a
//! dependency must be `completed`) and progress-based (a dependency must be
//! at 100%). Callers pick one per query.

mod graph;

pub use graph::{DependencyGraph, ReadinessMode};
