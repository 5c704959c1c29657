use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default planning horizon for a freshly created project, in calendar days.
const DEFAULT_HORIZON_DAYS: i64 = 90;

/// Project-level inputs captured by the host (description page, date form).
/// Passed into each planner call; the core keeps no session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_name: String,
    pub project_description: String,
    pub project_start_date: NaiveDate,
    pub project_end_date: NaiveDate,
}

impl ProjectMetadata {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            project_name: name.into(),
            project_description: String::new(),
            project_start_date: start,
            project_end_date: end,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.project_description = description.into();
        self
    }
}

impl Default for ProjectMetadata {
    /// A new project opens today and runs one quarter out.
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self::new(
            "New Project",
            today,
            today + Duration::days(DEFAULT_HORIZON_DAYS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_opens_today_and_spans_a_quarter() {
        let before = Local::now().date_naive();
        let metadata = ProjectMetadata::default();
        let after = Local::now().date_naive();

        assert!(metadata.project_start_date >= before);
        assert!(metadata.project_start_date <= after);
        assert_eq!(
            metadata.project_end_date - metadata.project_start_date,
            Duration::days(DEFAULT_HORIZON_DAYS)
        );
    }

    #[test]
    fn builder_sets_name_and_description() {
        let metadata = ProjectMetadata::new(
            "API overhaul",
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
        )
        .with_description("Rework the public API");

        assert_eq!(metadata.project_name, "API overhaul");
        assert_eq!(metadata.project_description, "Rework the public API");
    }
}
