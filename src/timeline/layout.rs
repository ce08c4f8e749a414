//! Proportional bar layout for a project window.
//!
//! # Algorithm
//!
//! 1. Total span = `project.end_date - project.start_date` in days.
//! 2. Each task's range is clipped to the window.
//! 3. Offset = days from window start to visible start, over total span.
//! 4. Width = visible days over total span, capped so offset + width <= 1.
//!
//! Tasks are laid out in list order; no chronological sorting happens here.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::models::{Project, Task};

/// Render-ready geometry for one task bar.
///
/// All fractions are in `[0, 1]` relative to the project window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBar {
    pub task_id: String,
    /// Left edge as a fraction of the window.
    pub offset_fraction: f64,
    /// Bar length as a fraction of the window.
    pub width_fraction: f64,
    /// Inner fill fraction from the task's progress.
    pub progress_fraction: f64,
    /// Whether the task's range was cut by the window edges.
    pub clipped: bool,
}

/// A header tick on the timeline (window start and each month boundary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub date: NaiveDate,
    pub offset_fraction: f64,
    /// Short label, e.g. `"Feb 2024"`.
    pub label: String,
}

/// Days between project start and end.
///
/// # Errors
/// [`TimelineError::InvalidRange`] if the window ends before it starts.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use project_timeline::models::Project;
/// use project_timeline::timeline::compute_total_span_days;
///
/// let project = Project::new(
///     "P1",
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// );
/// assert_eq!(compute_total_span_days(&project).unwrap(), 30);
/// ```
pub fn compute_total_span_days(project: &Project) -> Result<i64, TimelineError> {
    if project.end_date < project.start_date {
        return Err(TimelineError::InvalidRange {
            id: project.id.clone(),
            start: project.start_date,
            end: project.end_date,
        });
    }
    Ok((project.end_date - project.start_date).num_days())
}

/// Computes the bar geometry of `task` within `project`'s window.
///
/// Tasks lying wholly outside the window get a zero-width bar pinned to
/// the nearest edge. Progress outside 0..=100 is clamped.
///
/// # Errors
/// - [`TimelineError::InvalidRange`] if the window or the task is reversed.
/// - [`TimelineError::ZeroSpan`] if the window is zero days long.
pub fn compute_task_bar(project: &Project, task: &Task) -> Result<TaskBar, TimelineError> {
    let total = non_zero_span(project)?;
    bar_within(project, total, task)
}

fn non_zero_span(project: &Project) -> Result<f64, TimelineError> {
    let total = compute_total_span_days(project)?;
    if total == 0 {
        return Err(TimelineError::ZeroSpan(project.id.clone()));
    }
    Ok(total as f64)
}

fn bar_within(project: &Project, total: f64, task: &Task) -> Result<TaskBar, TimelineError> {
    if !task.has_valid_range() {
        return Err(TimelineError::InvalidRange {
            id: task.id.clone(),
            start: task.start_date,
            end: task.end_date,
        });
    }

    let progress_fraction = task.clamped_progress() as f64 / 100.0;
    let outside = |offset_fraction: f64| {
        tracing::debug!(task_id = %task.id, project_id = %project.id, "task outside timeline window");
        TaskBar {
            task_id: task.id.clone(),
            offset_fraction,
            width_fraction: 0.0,
            progress_fraction,
            clipped: true,
        }
    };

    if task.end_date < project.start_date {
        return Ok(outside(0.0));
    }
    if task.start_date > project.end_date {
        return Ok(outside(1.0));
    }

    let visible_start = task.start_date.max(project.start_date);
    let visible_end = task.end_date.min(project.end_date);
    let clipped = visible_start != task.start_date || visible_end != task.end_date;
    if clipped {
        tracing::debug!(task_id = %task.id, %visible_start, %visible_end, "task bar clipped");
    }

    let offset_fraction = ((visible_start - project.start_date).num_days() as f64 / total).clamp(0.0, 1.0);
    let width_fraction = ((visible_end - visible_start).num_days() as f64 / total)
        .min(1.0 - offset_fraction)
        .max(0.0);

    Ok(TaskBar {
        task_id: task.id.clone(),
        offset_fraction,
        width_fraction,
        progress_fraction,
        clipped,
    })
}

/// Markers for the window start and every first-of-month inside the window.
pub fn month_markers(project: &Project) -> Result<Vec<TimelineMarker>, TimelineError> {
    let total = non_zero_span(project)?;
    let marker = |date: NaiveDate| TimelineMarker {
        date,
        offset_fraction: (date - project.start_date).num_days() as f64 / total,
        label: date.format("%b %Y").to_string(),
    };

    let mut markers = vec![marker(project.start_date)];
    let first_of_month = project.start_date.with_day(1).unwrap_or(project.start_date);
    let mut next = first_of_month.checked_add_months(Months::new(1));
    while let Some(date) = next {
        if date >= project.end_date {
            break;
        }
        markers.push(marker(date));
        next = date.checked_add_months(Months::new(1));
    }
    Ok(markers)
}

/// Complete layout of a project: bars in list order plus header markers.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use project_timeline::models::{Project, Task};
/// use project_timeline::timeline::TimelineLayout;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let project = Project::new("P1", d(1, 1), d(1, 31))
///     .with_task(Task::new("A").with_dates(d(1, 1), d(1, 16)).with_progress(50));
///
/// let layout = TimelineLayout::for_project(&project).unwrap();
/// let bar = layout.bar("A").unwrap();
/// assert_eq!(bar.offset_fraction, 0.0);
/// assert_eq!(bar.width_fraction, 0.5);
/// assert_eq!(bar.progress_fraction, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub project_id: String,
    pub total_span_days: i64,
    pub bars: Vec<TaskBar>,
    pub markers: Vec<TimelineMarker>,
}

impl TimelineLayout {
    /// Lays out every task of `project`.
    ///
    /// Fails on the first reversed task range; tasks outside the window
    /// are clipped, not rejected.
    pub fn for_project(project: &Project) -> Result<Self, TimelineError> {
        let total = non_zero_span(project)?;
        let bars = project
            .tasks
            .iter()
            .map(|task| bar_within(project, total, task))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            project_id: project.id.clone(),
            total_span_days: total as i64,
            bars,
            markers: month_markers(project)?,
        })
    }

    /// Bar for a task ID.
    pub fn bar(&self, task_id: &str) -> Option<&TaskBar> {
        self.bars.iter().find(|b| b.task_id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> Project {
        Project::new("P1", date(2024, 1, 1), date(2024, 1, 31))
    }

    #[test]
    fn test_total_span_january() {
        assert_eq!(compute_total_span_days(&january()).unwrap(), 30);
    }

    #[test]
    fn test_total_span_reversed() {
        let project = Project::new("P1", date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(
            compute_total_span_days(&project),
            Err(TimelineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_zero_span() {
        let project = Project::new("P0", date(2024, 1, 1), date(2024, 1, 1));
        let task = Task::new("A").with_dates(date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(compute_total_span_days(&project).unwrap(), 0);
        assert_eq!(
            compute_task_bar(&project, &task),
            Err(TimelineError::ZeroSpan("P0".into()))
        );
    }

    #[test]
    fn test_bar_inside_window() {
        let task = Task::new("A")
            .with_dates(date(2024, 1, 7), date(2024, 1, 13))
            .with_progress(75);
        let bar = compute_task_bar(&january(), &task).unwrap();
        assert!((bar.offset_fraction - 6.0 / 30.0).abs() < 1e-12);
        assert!((bar.width_fraction - 6.0 / 30.0).abs() < 1e-12);
        assert_eq!(bar.progress_fraction, 0.75);
        assert!(!bar.clipped);
    }

    #[test]
    fn test_bar_reversed_task() {
        let task = Task::new("A").with_dates(date(2024, 1, 10), date(2024, 1, 5));
        assert!(matches!(
            compute_task_bar(&january(), &task),
            Err(TimelineError::InvalidRange { id, .. }) if id == "A"
        ));
    }

    #[test]
    fn test_bar_before_window_is_zero_width() {
        let task = Task::new("A").with_dates(date(2023, 12, 1), date(2023, 12, 15));
        let bar = compute_task_bar(&january(), &task).unwrap();
        assert_eq!(bar.width_fraction, 0.0);
        assert_eq!(bar.offset_fraction, 0.0);
        assert!(bar.clipped);
    }

    #[test]
    fn test_bar_after_window_is_zero_width() {
        let task = Task::new("A").with_dates(date(2024, 3, 1), date(2024, 3, 9));
        let bar = compute_task_bar(&january(), &task).unwrap();
        assert_eq!(bar.width_fraction, 0.0);
        assert_eq!(bar.offset_fraction, 1.0);
    }

    #[test]
    fn test_bar_overhanging_end_is_clipped() {
        let task = Task::new("A").with_dates(date(2024, 1, 16), date(2024, 2, 20));
        let bar = compute_task_bar(&january(), &task).unwrap();
        assert!((bar.offset_fraction - 0.5).abs() < 1e-12);
        assert!((bar.offset_fraction + bar.width_fraction - 1.0).abs() < 1e-12);
        assert!(bar.clipped);
    }

    #[test]
    fn test_bar_overhanging_start_is_clipped() {
        let task = Task::new("A").with_dates(date(2023, 12, 20), date(2024, 1, 16));
        let bar = compute_task_bar(&january(), &task).unwrap();
        assert_eq!(bar.offset_fraction, 0.0);
        assert!((bar.width_fraction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_progress_clamped() {
        let over = Task::new("A")
            .with_dates(date(2024, 1, 1), date(2024, 1, 2))
            .with_progress(250);
        let under = over.clone().with_progress(-10);
        assert_eq!(compute_task_bar(&january(), &over).unwrap().progress_fraction, 1.0);
        assert_eq!(compute_task_bar(&january(), &under).unwrap().progress_fraction, 0.0);
    }

    #[test]
    fn test_bar_is_idempotent() {
        let project = january();
        let task = Task::new("A").with_dates(date(2024, 1, 3), date(2024, 1, 9));
        assert_eq!(
            compute_task_bar(&project, &task).unwrap(),
            compute_task_bar(&project, &task).unwrap()
        );
    }

    #[test]
    fn test_layout_keeps_list_order() {
        let project = january()
            .with_task(Task::new("late").with_dates(date(2024, 1, 20), date(2024, 1, 25)))
            .with_task(Task::new("early").with_dates(date(2024, 1, 2), date(2024, 1, 4)));
        let layout = TimelineLayout::for_project(&project).unwrap();
        let ids: Vec<&str> = layout.bars.iter().map(|b| b.task_id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
        assert_eq!(layout.total_span_days, 30);
    }

    #[test]
    fn test_month_markers() {
        let project = Project::new("Q1", date(2024, 1, 15), date(2024, 3, 15));
        let markers = month_markers(&project).unwrap();
        let dates: Vec<NaiveDate> = markers.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 15), date(2024, 2, 1), date(2024, 3, 1)]);
        assert_eq!(markers[0].offset_fraction, 0.0);
        assert_eq!(markers[1].label, "Feb 2024");
        assert!(markers.iter().all(|m| (0.0..=1.0).contains(&m.offset_fraction)));
    }

    #[test]
    fn test_month_marker_not_placed_on_window_end() {
        let project = Project::new("P", date(2024, 1, 1), date(2024, 2, 1));
        let dates: Vec<NaiveDate> = month_markers(&project).unwrap().iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1)]);
    }

    #[test]
    fn test_month_markers_single_month() {
        let markers = month_markers(&january()).unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].label, "Jan 2024");
    }

    proptest! {
        #[test]
        fn prop_inside_bars_stay_in_unit_interval(
            span in 1i64..400,
            a in 0i64..400,
            b in 0i64..400,
        ) {
            let start = date(2024, 1, 1);
            let project = Project::new("P", start, start + chrono::Duration::days(span));
            let (lo, hi) = (a.min(b) % (span + 1), a.max(b) % (span + 1));
            let (lo, hi) = (lo.min(hi), lo.max(hi));
            let task = Task::new("T").with_dates(
                start + chrono::Duration::days(lo),
                start + chrono::Duration::days(hi),
            );
            let bar = compute_task_bar(&project, &task).unwrap();
            prop_assert!((0.0..=1.0).contains(&bar.offset_fraction));
            prop_assert!((0.0..=1.0).contains(&bar.width_fraction));
            prop_assert!(bar.offset_fraction + bar.width_fraction <= 1.0 + 1e-12);
        }

        #[test]
        fn prop_outside_bars_have_zero_width(gap in 1i64..200, len in 0i64..60, before in any::<bool>()) {
            let project = january();
            let task_start = if before {
                project.start_date - chrono::Duration::days(gap + len)
            } else {
                project.end_date + chrono::Duration::days(gap)
            };
            let task = Task::new("T").with_dates(task_start, task_start + chrono::Duration::days(len));
            let bar = compute_task_bar(&project, &task).unwrap();
            prop_assert_eq!(bar.width_fraction, 0.0);
        }
    }
}
