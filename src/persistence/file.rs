use super::PersistenceResult;
use crate::calendar::WorkCalendarConfig;
use crate::metadata::ProjectMetadata;
use crate::sprint::SprintConfig;
use crate::task::{Task, TaskRecord};
use crate::task_validation;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Whole-plan snapshot: metadata, calendar and cadence alongside the task
/// sheet, so a saved plan reloads without host-side reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub calendar: WorkCalendarConfig,
    #[serde(default)]
    pub sprint_config: SprintConfig,
    pub tasks: Vec<Task>,
}

impl PlanSnapshot {
    pub fn new(
        metadata: ProjectMetadata,
        calendar: WorkCalendarConfig,
        sprint_config: SprintConfig,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            metadata,
            calendar,
            sprint_config,
            tasks,
        }
    }
}

pub fn save_plan_to_json<P: AsRef<Path>>(snapshot: &PlanSnapshot, path: P) -> PersistenceResult<()> {
    task_validation::validate_task_collection(&snapshot.tasks)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, snapshot)?;
    debug!(tasks = snapshot.tasks.len(), "saved plan snapshot");
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<PlanSnapshot> {
    let file = File::open(path)?;
    let snapshot: PlanSnapshot = serde_json::from_reader(file)?;
    task_validation::validate_task_collection(&snapshot.tasks)?;
    debug!(tasks = snapshot.tasks.len(), "loaded plan snapshot");
    Ok(snapshot)
}

/// Export the task sheet with the columns the drafting stage and the download
/// button use: Sprint, Task_ID, Module, Task, Task_Dependency, Estimated
/// Time, Start, End, Resource, Progress.
pub fn save_tasks_to_csv<P: AsRef<Path>>(tasks: &[Task], path: P) -> PersistenceResult<()> {
    task_validation::validate_task_collection(tasks)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for task in tasks {
        writer.serialize(TaskRecord::from_task(task))?;
    }
    writer.flush()?;
    debug!(tasks = tasks.len(), "exported task sheet to csv");
    Ok(())
}

/// Import a task sheet. Every row passes the record boundary before anything
/// reaches graph logic.
pub fn load_tasks_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Task>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    for record in reader.deserialize::<TaskRecord>() {
        let record = record?;
        tasks.push(record.into_task()?);
    }
    task_validation::validate_task_collection(&tasks)?;
    debug!(tasks = tasks.len(), "imported task sheet from csv");
    Ok(tasks)
}
