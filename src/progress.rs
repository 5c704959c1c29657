use crate::task::TaskStatus;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Completion fraction used for the progress overlay. Fixed midpoints, not
/// time-based: an in-progress bar always reads half done.
pub fn progress_fraction(status: TaskStatus) -> f64 {
    match status {
        TaskStatus::Pending => 0.0,
        TaskStatus::InProgress => 0.5,
        TaskStatus::Completed => 1.0,
        TaskStatus::Blocked => 0.0,
    }
}

/// The rendered progress overlay: from the task start to the point reached at
/// its completion fraction. Both bounds are inclusive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSpan {
    pub start: NaiveDate,
    pub point: NaiveDate,
}

/// Project a task's status onto its scheduled interval.
///
/// `point = start + (end - start) * fraction`, rounded down to a whole day.
/// At fraction 0 the span is `[start, start]`: one inclusive day, so the
/// projection stays visible instead of collapsing to nothing.
pub fn progress_interval(start: NaiveDate, end: NaiveDate, status: TaskStatus) -> ProgressSpan {
    let total_days = (end - start).num_days().max(0);
    let elapsed = (total_days as f64 * progress_fraction(status)).floor() as i64;
    ProgressSpan {
        start,
        point: start + Duration::days(elapsed),
    }
}
