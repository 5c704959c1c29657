pub mod calculations;
pub mod calendar;
pub mod graph;
pub mod metadata;
pub mod persistence;
pub mod progress;
pub mod resource;
pub mod schedule;
pub mod sprint;
pub mod task;
pub mod task_validation;

pub use calendar::{InvalidRangeError, NoWorkingDaysError, WorkCalendar, WorkCalendarConfig};
pub use graph::{GraphError, TaskGraph};
pub use metadata::ProjectMetadata;
pub use persistence::{
    PersistenceError, PlanSnapshot, load_plan_from_json, load_tasks_from_csv, save_plan_to_json,
    save_tasks_to_csv,
};
pub use progress::{ProgressSpan, progress_fraction, progress_interval};
pub use resource::{ResourceConflict, assignments_from_tasks, find_conflicts};
pub use schedule::{
    PinSet, Planner, Schedule, ScheduleError, ScheduleRun, ScheduleSummary, ScheduledDates,
    SprintExtension,
};
pub use sprint::{SprintConfig, SprintPlan, SprintWindow};
pub use task::{EstimatedTime, Task, TaskRecord, TaskStatus, TimeUnit};
pub use task_validation::{TaskValidationError, validate_task, validate_task_collection};
