use chrono::NaiveDate;
use sprint_planner::task::TaskStatus;
use sprint_planner::{progress_fraction, progress_interval};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn fractions_follow_status() {
    assert_eq!(progress_fraction(TaskStatus::Pending), 0.0);
    assert_eq!(progress_fraction(TaskStatus::InProgress), 0.5);
    assert_eq!(progress_fraction(TaskStatus::Completed), 1.0);
    assert_eq!(progress_fraction(TaskStatus::Blocked), 0.0);
}

#[test]
fn pending_span_is_one_day_at_the_start() {
    let span = progress_interval(d(2025, 1, 6), d(2025, 1, 10), TaskStatus::Pending);
    assert_eq!(span.start, d(2025, 1, 6));
    assert_eq!(span.point, d(2025, 1, 6));
}

#[test]
fn blocked_span_matches_pending() {
    let pending = progress_interval(d(2025, 1, 6), d(2025, 1, 10), TaskStatus::Pending);
    let blocked = progress_interval(d(2025, 1, 6), d(2025, 1, 10), TaskStatus::Blocked);
    assert_eq!(pending, blocked);
}

#[test]
fn in_progress_reaches_the_midpoint_rounded_down() {
    // Jan 6 through Jan 10 spans 4 day-steps; half of that floors to 2.
    let span = progress_interval(d(2025, 1, 6), d(2025, 1, 10), TaskStatus::InProgress);
    assert_eq!(span.point, d(2025, 1, 8));

    // An odd step count floors: 5 steps * 0.5 -> 2.
    let span = progress_interval(d(2025, 1, 6), d(2025, 1, 11), TaskStatus::InProgress);
    assert_eq!(span.point, d(2025, 1, 8));
}

#[test]
fn completed_span_covers_the_whole_interval() {
    let span = progress_interval(d(2025, 1, 6), d(2025, 1, 10), TaskStatus::Completed);
    assert_eq!(span.point, d(2025, 1, 10));
}

#[test]
fn single_day_task_projects_onto_itself() {
    for status in [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Blocked,
    ] {
        let span = progress_interval(d(2025, 1, 6), d(2025, 1, 6), status);
        assert_eq!(span.start, d(2025, 1, 6));
        assert_eq!(span.point, d(2025, 1, 6));
    }
}
