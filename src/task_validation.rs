use crate::task::Task;
use std::collections::HashSet;
use std::fmt;

/// Validation failures at the record boundary. Every variant that concerns a
/// specific task carries its id so the host can highlight the exact row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    DuplicateTask {
        task_id: String,
    },
    InvalidDuration {
        task_id: String,
        value: String,
    },
    InvalidStatus {
        task_id: String,
        value: String,
    },
    InvalidDate {
        task_id: String,
        value: String,
    },
    StartAfterEnd {
        task_id: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    SelfDependency {
        task_id: String,
    },
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskValidationError::EmptyId => write!(f, "task record is missing an id"),
            TaskValidationError::DuplicateTask { task_id } => {
                write!(f, "duplicate task id '{task_id}'")
            }
            TaskValidationError::InvalidDuration { task_id, value } => {
                write!(
                    f,
                    "task '{task_id}' has invalid estimated time '{value}' (expected e.g. '8 hours' or '3 days', at least 1 working day)"
                )
            }
            TaskValidationError::InvalidStatus { task_id, value } => {
                write!(f, "task '{task_id}' has unknown progress status '{value}'")
            }
            TaskValidationError::InvalidDate { task_id, value } => {
                write!(
                    f,
                    "task '{task_id}' has invalid date '{value}' (expected YYYY-MM-DD)"
                )
            }
            TaskValidationError::StartAfterEnd {
                task_id,
                start,
                end,
            } => {
                write!(f, "task '{task_id}' starts {start} after it ends {end}")
            }
            TaskValidationError::SelfDependency { task_id } => {
                write!(f, "task '{task_id}' depends on itself")
            }
        }
    }
}

impl std::error::Error for TaskValidationError {}

/// Structural checks on a single task. Referential checks against the rest of
/// the graph (unknown dependencies, cycles) happen in `TaskGraph::build`.
pub fn validate_task(task: &Task) -> Result<(), TaskValidationError> {
    if task.id.trim().is_empty() {
        return Err(TaskValidationError::EmptyId);
    }

    if task.duration_days() < 1 {
        return Err(TaskValidationError::InvalidDuration {
            task_id: task.id.clone(),
            value: task.estimate.to_string(),
        });
    }

    if let (Some(start), Some(end)) = (task.start, task.end) {
        if start > end {
            return Err(TaskValidationError::StartAfterEnd {
                task_id: task.id.clone(),
                start,
                end,
            });
        }
    }

    if task.dependencies.iter().any(|dep| dep == &task.id) {
        return Err(TaskValidationError::SelfDependency {
            task_id: task.id.clone(),
        });
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id.as_str()) {
            return Err(TaskValidationError::DuplicateTask {
                task_id: task.id.clone(),
            });
        }
        validate_task(task)?;
    }
    Ok(())
}
