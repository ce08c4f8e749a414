//! Gantt-style timeline layout.
//!
//! Maps a project's date window and task list to horizontal fractions a
//! renderer can scale to any width. All functions are pure.
//!
//! # Clipping
//!
//! Tasks that spill over the window are cut at its edges; tasks wholly
//! outside it get zero-width bars. Only reversed ranges and zero-day
//! windows are errors.

mod layout;

pub use layout::{
    compute_task_bar, compute_total_span_days, month_markers, TaskBar, TimelineLayout,
    TimelineMarker,
};
