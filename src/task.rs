use crate::task_validation::TaskValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a task, as edited in the task sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Blocked => "BLOCKED",
        }
    }

    /// Accepts both the underscore form and the spaced form used by the
    /// editable table ("IN PROGRESS").
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(TaskStatus::Pending),
            "IN_PROGRESS" | "IN PROGRESS" => Some(TaskStatus::InProgress),
            "COMPLETED" => Some(TaskStatus::Completed),
            "BLOCKED" => Some(TaskStatus::Blocked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Hours,
    Days,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

/// Estimated effort as drafted upstream: "8 hours" or "3 days".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EstimatedTime {
    pub count: u32,
    pub unit: TimeUnit,
}

/// Hours per working day when converting hour estimates to schedule days.
const HOURS_PER_WORKING_DAY: u32 = 8;

impl EstimatedTime {
    pub fn days(count: u32) -> Self {
        Self {
            count,
            unit: TimeUnit::Days,
        }
    }

    pub fn hours(count: u32) -> Self {
        Self {
            count,
            unit: TimeUnit::Hours,
        }
    }

    /// Duration in working days. Hour estimates round up to whole days;
    /// a zero count stays zero and is rejected by validation.
    pub fn working_days(&self) -> i64 {
        match self.unit {
            TimeUnit::Days => self.count as i64,
            TimeUnit::Hours => self.count.div_ceil(HOURS_PER_WORKING_DAY) as i64,
        }
    }

    /// Parse "8 hours" / "3 days" (case-insensitive, singular accepted).
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let count = parts.next()?.parse::<u32>().ok()?;
        let unit = match parts.next()?.to_ascii_lowercase().as_str() {
            "hour" | "hours" => TimeUnit::Hours,
            "day" | "days" => TimeUnit::Days,
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self { count, unit })
    }
}

impl fmt::Display for EstimatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.unit.as_str())
    }
}

/// A validated task. Dates are filled in by the scheduler (or carried over
/// from an imported sheet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Sprint label such as "Sprint 2"; absent means the scheduler default.
    pub sprint: Option<String>,
    pub estimate: EstimatedTime,
    /// Ids of tasks that must finish before this one starts.
    pub dependencies: Vec<String>,
    /// Opaque module label produced by the classification stage.
    pub module: String,
    /// Assignee; `None` means unassigned.
    pub resource: Option<String>,
    pub status: TaskStatus,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, estimate: EstimatedTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sprint: None,
            estimate,
            dependencies: Vec::new(),
            module: String::new(),
            resource: None,
            status: TaskStatus::Pending,
            start: None,
            end: None,
        }
    }

    pub fn duration_days(&self) -> i64 {
        self.estimate.working_days()
    }
}

/// Wire record exchanged with the drafting stage, the task sheet and the CSV
/// export. Column names match the sheet exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "Sprint", default)]
    pub sprint: String,
    #[serde(rename = "Task_ID")]
    pub task_id: String,
    #[serde(rename = "Module", default)]
    pub module: String,
    #[serde(rename = "Task")]
    pub task: String,
    /// Comma-joined dependency ids; round-trips to the identical ordered list.
    #[serde(rename = "Task_Dependency", default)]
    pub task_dependency: String,
    #[serde(rename = "Estimated Time")]
    pub estimated_time: String,
    #[serde(rename = "Start", default)]
    pub start: String,
    #[serde(rename = "End", default)]
    pub end: String,
    #[serde(rename = "Resource", default)]
    pub resource: String,
    #[serde(rename = "Progress", default)]
    pub progress: String,
}

impl TaskRecord {
    pub fn from_task(task: &Task) -> Self {
        Self {
            sprint: task.sprint.clone().unwrap_or_default(),
            task_id: task.id.clone(),
            module: task.module.clone(),
            task: task.name.clone(),
            task_dependency: join_ids(&task.dependencies),
            estimated_time: task.estimate.to_string(),
            start: format_date(task.start),
            end: format_date(task.end),
            resource: task.resource.clone().unwrap_or_default(),
            progress: task.status.as_str().to_string(),
        }
    }

    /// Convert an untrusted record into a `Task`, rejecting rather than
    /// guessing defaults. An empty Progress cell is the one tolerated blank
    /// (new rows default to PENDING in the sheet).
    pub fn into_task(self) -> Result<Task, TaskValidationError> {
        let task_id = self.task_id.trim().to_string();
        if task_id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }

        let estimate = EstimatedTime::parse(&self.estimated_time).ok_or_else(|| {
            TaskValidationError::InvalidDuration {
                task_id: task_id.clone(),
                value: self.estimated_time.clone(),
            }
        })?;

        let status = if self.progress.trim().is_empty() {
            TaskStatus::Pending
        } else {
            TaskStatus::from_str(&self.progress).ok_or_else(|| {
                TaskValidationError::InvalidStatus {
                    task_id: task_id.clone(),
                    value: self.progress.clone(),
                }
            })?
        };

        let start = parse_date_field(&task_id, &self.start)?;
        let end = parse_date_field(&task_id, &self.end)?;

        Ok(Task {
            id: task_id,
            name: self.task.trim().to_string(),
            sprint: non_empty(self.sprint),
            estimate,
            dependencies: split_ids(&self.task_dependency),
            module: self.module.trim().to_string(),
            resource: non_empty(self.resource),
            status,
            start,
            end,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_date_field(
    task_id: &str,
    value: &str,
) -> Result<Option<NaiveDate>, TaskValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| TaskValidationError::InvalidDate {
            task_id: task_id.to_string(),
            value: value.to_string(),
        })
}

pub(crate) fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Comma-join dependency ids for the wire record.
pub fn join_ids(ids: &[String]) -> String {
    ids.join(",")
}

/// Split a comma-joined id list, trimming and dropping blanks, deduplicating
/// while preserving first-seen order so round-trips are stable.
pub fn split_ids(input: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if !ids.iter().any(|existing| existing == part) {
            ids.push(part.to_string());
        }
    }
    ids
}
