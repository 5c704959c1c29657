use crate::calendar::WorkCalendar;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sprint cadence driving the window length, in calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SprintConfig {
    Weekly,
    #[default]
    Biweekly,
    Monthly,
}

impl SprintConfig {
    pub fn calendar_days(&self) -> i64 {
        match self {
            SprintConfig::Weekly => 7,
            SprintConfig::Biweekly => 14,
            SprintConfig::Monthly => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SprintConfig::Weekly => "Weekly",
            SprintConfig::Biweekly => "Biweekly",
            SprintConfig::Monthly => "Monthly",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(SprintConfig::Weekly),
            "biweekly" => Some(SprintConfig::Biweekly),
            "monthly" => Some(SprintConfig::Monthly),
            _ => None,
        }
    }
}

/// One sprint window. `start` and `end` are working days; `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintWindow {
    pub index: usize,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Ordered, contiguous, non-overlapping sprint windows. Sprint 1 starts at the
/// project start; each later sprint begins on the next working day after its
/// predecessor ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SprintPlanParts")]
pub struct SprintPlan {
    config: SprintConfig,
    windows: Vec<SprintWindow>,
}

/// Deserialization mirror. A plan arriving from outside must carry at least
/// one window, matching what `generate` guarantees.
#[derive(Deserialize)]
struct SprintPlanParts {
    config: SprintConfig,
    windows: Vec<SprintWindow>,
}

impl TryFrom<SprintPlanParts> for SprintPlan {
    type Error = String;

    fn try_from(parts: SprintPlanParts) -> Result<Self, Self::Error> {
        if parts.windows.is_empty() {
            return Err("sprint plan has no windows".to_string());
        }
        Ok(Self {
            config: parts.config,
            windows: parts.windows,
        })
    }
}

impl SprintPlan {
    pub fn generate(
        project_start: NaiveDate,
        count: usize,
        config: SprintConfig,
        calendar: &WorkCalendar,
    ) -> Self {
        let mut plan = Self {
            config,
            windows: Vec::with_capacity(count),
        };
        let mut cursor = if calendar.is_working_day(project_start) {
            project_start
        } else {
            calendar.next_working_day(project_start)
        };
        for _ in 0..count.max(1) {
            cursor = plan.push_window(cursor, calendar);
        }
        plan
    }

    /// Windows covering the inclusive project date range. Always yields at
    /// least one window; a reversed range degenerates to one.
    pub fn generate_covering(
        project_start: NaiveDate,
        project_end: NaiveDate,
        config: SprintConfig,
        calendar: &WorkCalendar,
    ) -> Self {
        let mut plan = Self::generate(project_start, 1, config, calendar);
        while plan.end().is_some_and(|end| end < project_end) {
            plan.extend(calendar);
        }
        plan
    }

    /// Append one window starting at `start` (already a working day) and
    /// return the start of the window after it.
    fn push_window(&mut self, start: NaiveDate, calendar: &WorkCalendar) -> NaiveDate {
        let raw_end = start + Duration::days(self.config.calendar_days() - 1);
        let end = calendar.last_working_day_within(start, raw_end);
        let index = self.windows.len() + 1;
        self.windows.push(SprintWindow {
            index,
            label: format!("Sprint {index}"),
            start,
            end,
        });
        calendar.next_working_day(end)
    }

    /// Append one sprint-length increment. Overflow extends the timeline
    /// rather than rejecting the schedule.
    pub fn extend(&mut self, calendar: &WorkCalendar) -> &SprintWindow {
        let start = match self.windows.last() {
            Some(last) => calendar.next_working_day(last.end),
            None => unreachable!("sprint plans are generated with at least one window"),
        };
        self.push_window(start, calendar);
        self.windows.last().expect("window just pushed")
    }

    /// 1-based window lookup.
    pub fn window(&self, index: usize) -> Option<&SprintWindow> {
        if index == 0 {
            return None;
        }
        self.windows.get(index - 1)
    }

    /// Parse a sprint label ("Sprint 3", "sprint 3", bare "3") to its 1-based
    /// index. Unparseable labels mean unassigned.
    pub fn parse_label(label: &str) -> Option<usize> {
        let trimmed = label.trim();
        let digits = trimmed
            .strip_prefix("Sprint")
            .or_else(|| trimmed.strip_prefix("sprint"))
            .or_else(|| trimmed.strip_prefix("SPRINT"))
            .unwrap_or(trimmed)
            .trim();
        match digits.parse::<usize>() {
            Ok(index) if index >= 1 => Some(index),
            _ => None,
        }
    }

    pub fn config(&self) -> SprintConfig {
        self.config
    }

    pub fn windows(&self) -> &[SprintWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.windows.first().map(|w| w.start)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.windows.last().map(|w| w.end)
    }
}
