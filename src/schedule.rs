use crate::calculations::ForwardPass;
use crate::calendar::WorkCalendar;
use crate::graph::TaskGraph;
use crate::metadata::ProjectMetadata;
use crate::sprint::{SprintConfig, SprintPlan};
use crate::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

/// Scheduling failures. The scheduler never partially commits: on error the
/// caller keeps its previous schedule, and every variant names the offending
/// task so the host can highlight the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    InvalidDuration {
        task_id: String,
        estimate: String,
    },
    InconsistentPin {
        task_id: String,
        dependency_id: String,
        pinned_start: NaiveDate,
        dependency_end: NaiveDate,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidDuration { task_id, estimate } => write!(
                f,
                "task '{task_id}' has estimate '{estimate}' shorter than one working day"
            ),
            ScheduleError::InconsistentPin {
                task_id,
                dependency_id,
                pinned_start,
                dependency_end,
            } => write!(
                f,
                "task '{task_id}' is pinned to start {pinned_start}, on or before its dependency '{dependency_id}' pinned to end {dependency_end}"
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Computed working-day dates for one task, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Derived mapping from task id to dates. Recomputed wholesale on every run;
/// comparable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    entries: BTreeMap<String, ScheduledDates>,
}

impl Schedule {
    pub(crate) fn from_entries(entries: BTreeMap<String, ScheduledDates>) -> Self {
        Self { entries }
    }

    pub fn get(&self, task_id: &str) -> Option<ScheduledDates> {
        self.entries.get(task_id).copied()
    }

    pub fn start_of(&self, task_id: &str) -> Option<NaiveDate> {
        self.get(task_id).map(|dates| dates.start)
    }

    pub fn end_of(&self, task_id: &str) -> Option<NaiveDate> {
        self.get(task_id).map(|dates| dates.end)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ScheduledDates)> {
        self.entries.iter().map(|(id, dates)| (id.as_str(), *dates))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest_finish(&self) -> Option<NaiveDate> {
        self.entries.values().map(|dates| dates.end).max()
    }

    /// Write the computed dates back into task records for export and
    /// visualization.
    pub fn apply_to_tasks(&self, tasks: &mut [Task]) {
        for task in tasks {
            if let Some(dates) = self.get(&task.id) {
                task.start = Some(dates.start);
                task.end = Some(dates.end);
            }
        }
    }
}

/// Snapshot constructor for dates coming back from storage or the edited
/// sheet, e.g. to run conflict detection without a fresh scheduling pass.
impl FromIterator<(String, ScheduledDates)> for Schedule {
    fn from_iter<T: IntoIterator<Item = (String, ScheduledDates)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// User-supplied pinned dates, treated as fixed lower bounds on the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinSet {
    starts: HashMap<String, NaiveDate>,
    ends: HashMap<String, NaiveDate>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin_start(&mut self, task_id: impl Into<String>, date: NaiveDate) {
        self.starts.insert(task_id.into(), date);
    }

    pub fn pin_end(&mut self, task_id: impl Into<String>, date: NaiveDate) {
        self.ends.insert(task_id.into(), date);
    }

    pub fn start_of(&self, task_id: &str) -> Option<NaiveDate> {
        self.starts.get(task_id).copied()
    }

    pub fn end_of(&self, task_id: &str) -> Option<NaiveDate> {
        self.ends.get(task_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty() && self.ends.is_empty()
    }

    /// Treat dates already present on edited task records as pins.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut pins = Self::new();
        for task in tasks {
            if let Some(start) = task.start {
                pins.pin_start(task.id.clone(), start);
            }
            if let Some(end) = task.end {
                pins.pin_end(task.id.clone(), end);
            }
        }
        pins
    }
}

/// A sprint window appended during scheduling because a task overflowed the
/// plan (or referenced a sprint beyond it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintExtension {
    pub index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub triggered_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub task_count: usize,
    pub sprint_count: usize,
    pub latest_finish: Option<NaiveDate>,
    pub extensions: Vec<SprintExtension>,
}

impl ScheduleSummary {
    pub fn to_summary_line(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("sprints={}", self.sprint_count));
        if let Some(date) = self.latest_finish {
            parts.push(format!("finish={date}"));
        }
        if !self.extensions.is_empty() {
            parts.push(format!("extended+={}", self.extensions.len()));
        }
        parts.join(", ")
    }
}

/// Everything one scheduling run produces. The plan comes back possibly
/// extended; the schedule supersedes any previous one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRun {
    pub schedule: Schedule,
    pub sprint_plan: SprintPlan,
    pub summary: ScheduleSummary,
}

/// Scheduling entry point: metadata + calendar + sprint cadence in, dated
/// schedule out. Pure over its inputs; no wall-clock reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Planner {
    metadata: ProjectMetadata,
    calendar: WorkCalendar,
    sprint_config: SprintConfig,
}

impl Planner {
    pub fn new(metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            calendar: WorkCalendar::default(),
            sprint_config: SprintConfig::default(),
        }
    }

    pub fn with_calendar(mut self, calendar: WorkCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_sprint_config(mut self, config: SprintConfig) -> Self {
        self.sprint_config = config;
        self
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn sprint_config(&self) -> SprintConfig {
        self.sprint_config
    }

    /// Sprint windows covering the project's date range, before any
    /// scheduling-time extension.
    pub fn initial_sprint_plan(&self) -> SprintPlan {
        SprintPlan::generate_covering(
            self.metadata.project_start_date,
            self.metadata.project_end_date,
            self.sprint_config,
            &self.calendar,
        )
    }

    /// Produce a fresh schedule for the graph.
    pub fn schedule(&self, graph: &TaskGraph) -> Result<ScheduleRun, ScheduleError> {
        self.reschedule(graph, &PinSet::new())
    }

    /// Reschedule with user-pinned dates as fixed lower bounds. Pinned tasks
    /// never move earlier than their pins; unpinned successors still shift
    /// when a predecessor's end moves later.
    pub fn reschedule(&self, graph: &TaskGraph, pins: &PinSet) -> Result<ScheduleRun, ScheduleError> {
        let plan = self.initial_sprint_plan();
        let result = ForwardPass::new(graph, &self.calendar).execute(plan, pins)?;

        let schedule = Schedule::from_entries(result.entries);
        let summary = ScheduleSummary {
            task_count: graph.len(),
            sprint_count: result.plan.len(),
            latest_finish: schedule.latest_finish(),
            extensions: result.extensions,
        };
        Ok(ScheduleRun {
            schedule,
            sprint_plan: result.plan,
            summary,
        })
    }
}
