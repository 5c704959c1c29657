use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Raised when a date range is queried with `start > end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for InvalidRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "range start {} must be on or before range end {}",
            self.start, self.end
        )
    }
}

impl std::error::Error for InvalidRangeError {}

/// Raised when a calendar update would leave no working weekday at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoWorkingDaysError;

impl fmt::Display for NoWorkingDaysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "calendar must keep at least one working weekday")
    }
}

impl std::error::Error for NoWorkingDaysError {}

/// Working calendar: a weekday mask plus a set of excluded dates (holidays).
///
/// Whether a date is a working day is a pure function of the two fields.
/// Every constructor keeps at least one working weekday, so forward searches
/// like `next_working_day` always terminate (the holiday set is finite).
/// The serde form is [`WorkCalendarConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorkCalendar {
    non_working_days: HashSet<Weekday>,
    holidays: HashSet<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    working_days: Vec<Weekday>,
    holidays: Vec<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
            holidays: HashSet::new(),
        }
    }
}

impl WorkCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Mon-Fri calendar with the supplied custom holidays.
    pub fn with_holidays<I>(holidays: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut calendar = Self::default();
        calendar.holidays.extend(holidays);
        calendar
    }

    pub fn custom<I, J>(working_days: I, holidays: J) -> Result<Self, NoWorkingDaysError>
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let config = WorkCalendarConfig::new(working_days, holidays);
        Self::from_config(&config)
    }

    /// Rejects a config whose weekday mask admits no working day; such a
    /// calendar could never produce a next working day.
    pub fn from_config(config: &WorkCalendarConfig) -> Result<Self, NoWorkingDaysError> {
        if config.working_days.is_empty() {
            return Err(NoWorkingDaysError);
        }

        let working_set: HashSet<Weekday> = config.working_days.iter().copied().collect();
        let mut non_working_days = HashSet::new();
        for day in Self::ALL_WEEKDAYS {
            if !working_set.contains(&day) {
                non_working_days.insert(day);
            }
        }

        Ok(Self {
            non_working_days,
            holidays: config.holidays.iter().copied().collect(),
        })
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    /// Add a single holiday
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays at once
    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    /// Set custom working days (e.g., Mon-Sat for 6-day weeks). The calendar
    /// is left untouched when the new set would be empty.
    pub fn set_working_days(&mut self, days: Vec<Weekday>) -> Result<(), NoWorkingDaysError> {
        if days.is_empty() {
            return Err(NoWorkingDaysError);
        }
        self.non_working_days.clear();
        for day in Self::ALL_WEEKDAYS {
            if !days.contains(&day) {
                self.non_working_days.insert(day);
            }
        }
        Ok(())
    }

    /// Check if a date is available for scheduling
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date) && !self.non_working_days.contains(&date.weekday())
    }

    /// Find the next working day strictly after a given date
    pub fn next_working_day(&self, from: NaiveDate) -> NaiveDate {
        let mut current = from + Duration::days(1);
        while !self.is_working_day(current) {
            current = current + Duration::days(1);
        }
        current
    }

    /// Find the date reached by stepping forward `n` working days.
    ///
    /// `n = 0` returns `date` itself when it is a working day, otherwise the
    /// next working day.
    pub fn advance_working_days(&self, date: NaiveDate, n: i64) -> NaiveDate {
        let mut current = date;
        if !self.is_working_day(current) {
            current = self.next_working_day(current);
        }
        let mut remaining = n;
        while remaining > 0 {
            current = self.next_working_day(current);
            remaining -= 1;
        }
        current
    }

    /// All working days in an inclusive date range
    pub fn working_days_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, InvalidRangeError> {
        if start > end {
            return Err(InvalidRangeError { start, end });
        }
        let mut days = Vec::new();
        let mut current = start;
        while current <= end {
            if self.is_working_day(current) {
                days.push(current);
            }
            current = current + Duration::days(1);
        }
        Ok(days)
    }

    /// Count working days in an inclusive date range
    pub fn count_working_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, InvalidRangeError> {
        self.working_days_between(start, end)
            .map(|days| days.len() as i64)
    }

    /// Last working day on or before `date` but not before `floor`.
    /// Falls back to `floor` when the whole span is non-working.
    pub(crate) fn last_working_day_within(&self, floor: NaiveDate, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while current > floor {
            if self.is_working_day(current) {
                return current;
            }
            current = current - Duration::days(1);
        }
        floor
    }
}

impl WorkCalendarConfig {
    pub fn new<I, J>(working_days: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let mut working_days: Vec<Weekday> = working_days.into_iter().collect();
        working_days.sort_by_key(|wd| wd.num_days_from_monday());
        working_days.dedup_by_key(|wd| wd.num_days_from_monday());

        let mut holidays: Vec<NaiveDate> = holidays.into_iter().collect();
        holidays.sort();
        holidays.dedup();

        Self {
            working_days,
            holidays,
        }
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }
}

impl Default for WorkCalendarConfig {
    fn default() -> Self {
        WorkCalendar::default().to_config()
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        let working_days = WorkCalendar::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !calendar.non_working_days.contains(day));
        Self::new(working_days, calendar.holidays.iter().copied())
    }
}
