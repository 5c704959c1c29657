use chrono::{Datelike, NaiveDate, Weekday};
use sprint_planner::calendar::{
    InvalidRangeError, NoWorkingDaysError, WorkCalendar, WorkCalendarConfig,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn default_calendar_weekends_not_working() {
    let cal = WorkCalendar::default();
    // 2025-01-04 is a Saturday, 2025-01-05 is a Sunday
    assert!(!cal.is_working_day(d(2025, 1, 4)));
    assert!(!cal.is_working_day(d(2025, 1, 5)));
    assert!(cal.is_working_day(d(2025, 1, 6)));
}

#[test]
fn holidays_excluded_from_working_days() {
    let cal = WorkCalendar::with_holidays([d(2025, 1, 6)]);
    assert!(!cal.is_working_day(d(2025, 1, 6)));
    assert!(cal.is_working_day(d(2025, 1, 7)));
}

#[test]
fn working_days_between_excludes_weekends_and_holidays() {
    // Jan 1 2025 (Wed) through Jan 14 (Tue), holiday on Jan 6: two weekends
    // (4 days) and the holiday drop out of the 14 calendar days.
    let cal = WorkCalendar::with_holidays([d(2025, 1, 6)]);
    let days = cal.working_days_between(d(2025, 1, 1), d(2025, 1, 14)).unwrap();
    assert_eq!(days.len(), 9);
    assert!(days.iter().all(|day| day.weekday() != Weekday::Sat));
    assert!(days.iter().all(|day| day.weekday() != Weekday::Sun));
    assert!(!days.contains(&d(2025, 1, 6)));
    assert_eq!(days.first().copied(), Some(d(2025, 1, 1)));
    assert_eq!(days.last().copied(), Some(d(2025, 1, 14)));
}

#[test]
fn single_weekday_range_has_one_working_day() {
    let cal = WorkCalendar::default();
    let wed = d(2025, 1, 8);
    let days = cal.working_days_between(wed, wed).unwrap();
    assert_eq!(days, vec![wed]);
    assert_eq!(cal.count_working_days(wed, wed).unwrap(), 1);
}

#[test]
fn reversed_range_is_an_error() {
    let cal = WorkCalendar::default();
    let err = cal
        .working_days_between(d(2025, 1, 10), d(2025, 1, 6))
        .unwrap_err();
    assert_eq!(
        err,
        InvalidRangeError {
            start: d(2025, 1, 10),
            end: d(2025, 1, 6),
        }
    );
}

#[test]
fn next_working_day_skips_weekend_and_holiday() {
    let cal = WorkCalendar::with_holidays([d(2025, 1, 6)]);
    // From Friday Jan 3: Sat, Sun and the Monday holiday are all skipped.
    assert_eq!(cal.next_working_day(d(2025, 1, 3)), d(2025, 1, 7));
}

#[test]
fn advance_zero_days_from_working_day_is_identity() {
    let cal = WorkCalendar::default();
    let mon = d(2025, 1, 6);
    assert_eq!(cal.advance_working_days(mon, 0), mon);
}

#[test]
fn advance_zero_days_from_weekend_snaps_forward() {
    let cal = WorkCalendar::default();
    assert_eq!(cal.advance_working_days(d(2025, 1, 4), 0), d(2025, 1, 6));
}

#[test]
fn advance_counts_only_working_days() {
    let cal = WorkCalendar::default();
    // 4 working days ahead of Monday lands on Friday.
    assert_eq!(cal.advance_working_days(d(2025, 1, 6), 4), d(2025, 1, 10));
    // Crossing the weekend: 5 ahead of Monday is the next Monday.
    assert_eq!(cal.advance_working_days(d(2025, 1, 6), 5), d(2025, 1, 13));
}

#[test]
fn custom_working_days_include_saturday() {
    let mut cal = WorkCalendar::default();
    cal.set_working_days(vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ])
    .unwrap();
    assert!(cal.is_working_day(d(2025, 1, 4)));
    assert!(!cal.is_working_day(d(2025, 1, 5)));
}

#[test]
fn config_round_trip_preserves_calendar() {
    let cal = WorkCalendar::custom(
        [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu],
        [d(2025, 6, 19), d(2025, 7, 3)],
    )
    .unwrap();
    let config = cal.to_config();
    assert_eq!(
        config.working_days(),
        &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu]
    );
    assert_eq!(config.holidays(), &[d(2025, 6, 19), d(2025, 7, 3)]);

    let recreated = WorkCalendar::from_config(&config).unwrap();
    assert_eq!(recreated, cal);
}

#[test]
fn calendar_requires_a_working_weekday() {
    let err = WorkCalendar::custom(Vec::new(), Vec::new()).unwrap_err();
    assert_eq!(err, NoWorkingDaysError);

    let config = WorkCalendarConfig::new(Vec::new(), Vec::new());
    assert_eq!(WorkCalendar::from_config(&config).unwrap_err(), NoWorkingDaysError);
}

#[test]
fn rejected_working_day_update_leaves_calendar_usable() {
    let mut cal = WorkCalendar::default();
    assert_eq!(cal.set_working_days(Vec::new()).unwrap_err(), NoWorkingDaysError);
    // Still the default Mon-Fri calendar.
    assert!(cal.is_working_day(d(2025, 1, 6)));
    assert_eq!(cal.next_working_day(d(2025, 1, 3)), d(2025, 1, 6));
}
