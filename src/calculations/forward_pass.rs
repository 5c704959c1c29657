use crate::calendar::WorkCalendar;
use crate::graph::TaskGraph;
use crate::schedule::{PinSet, ScheduleError, ScheduledDates, SprintExtension};
use crate::sprint::SprintPlan;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Single linear walk over the topological order, assigning working-day
/// start/end dates. O(T + E) after the topological sort.
pub struct ForwardPass<'a> {
    graph: &'a TaskGraph,
    calendar: &'a WorkCalendar,
}

pub struct PassResult {
    pub entries: BTreeMap<String, ScheduledDates>,
    pub plan: SprintPlan,
    pub extensions: Vec<SprintExtension>,
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a TaskGraph, calendar: &'a WorkCalendar) -> Self {
        Self { graph, calendar }
    }

    pub fn execute(&self, mut plan: SprintPlan, pins: &PinSet) -> Result<PassResult, ScheduleError> {
        self.validate_durations()?;
        self.validate_pins(pins)?;

        let mut entries: BTreeMap<String, ScheduledDates> = BTreeMap::new();
        let mut finishes: BTreeMap<&str, NaiveDate> = BTreeMap::new();
        let mut extensions: Vec<SprintExtension> = Vec::new();

        for task in self.graph.topological_order() {
            // A task with no sprint label defaults to sprint 1.
            let sprint_index = task
                .sprint
                .as_deref()
                .and_then(SprintPlan::parse_label)
                .unwrap_or(1);

            while plan.len() < sprint_index {
                let window = plan.extend(self.calendar).clone();
                debug!(
                    task = %task.id,
                    sprint = window.index,
                    end = %window.end,
                    "appended sprint window to reach the task's sprint label"
                );
                extensions.push(SprintExtension {
                    index: window.index,
                    start: window.start,
                    end: window.end,
                    triggered_by: task.id.clone(),
                });
            }
            let window_start = plan
                .window(sprint_index)
                .map(|w| w.start)
                .unwrap_or_else(|| plan.start().expect("plan has at least one window"));

            // Earliest feasible start: the later of the next working day after
            // the latest dependency finish and the sprint window start.
            let mut start = window_start;
            for dep in &task.dependencies {
                let dep_finish = finishes
                    .get(dep.as_str())
                    .copied()
                    .expect("dependencies precede the task in topological order");
                let bound = self.calendar.next_working_day(dep_finish);
                if bound > start {
                    start = bound;
                }
            }

            if let Some(pinned_start) = pins.start_of(&task.id) {
                // Pins are lower bounds: never move the task earlier than its
                // pin, but dependencies may still push it later.
                let pinned_start = self.calendar.advance_working_days(pinned_start, 0);
                if pinned_start > start {
                    start = pinned_start;
                }
            }

            let mut end = self
                .calendar
                .advance_working_days(start, task.duration_days() - 1);
            if let Some(pinned_end) = pins.end_of(&task.id) {
                let pinned_end = self.calendar.advance_working_days(pinned_end, 0);
                if pinned_end > end {
                    end = pinned_end;
                }
            }

            // Overflow past the plan appends trailing sprints rather than
            // failing; the adjustment is surfaced to the caller.
            while plan.end().is_some_and(|plan_end| end > plan_end) {
                let window = plan.extend(self.calendar).clone();
                debug!(
                    task = %task.id,
                    sprint = window.index,
                    end = %window.end,
                    "extended sprint plan to cover task finish"
                );
                extensions.push(SprintExtension {
                    index: window.index,
                    start: window.start,
                    end: window.end,
                    triggered_by: task.id.clone(),
                });
            }

            finishes.insert(task.id.as_str(), end);
            entries.insert(task.id.clone(), ScheduledDates { start, end });
        }

        Ok(PassResult {
            entries,
            plan,
            extensions,
        })
    }

    fn validate_durations(&self) -> Result<(), ScheduleError> {
        for task in self.graph.tasks() {
            if task.duration_days() < 1 {
                return Err(ScheduleError::InvalidDuration {
                    task_id: task.id.clone(),
                    estimate: task.estimate.to_string(),
                });
            }
        }
        Ok(())
    }

    /// A pinned task starting on or before a pinned dependency's end can never
    /// satisfy the strict next-working-day rule; surface it instead of
    /// silently repairing. Checked before any date is produced.
    fn validate_pins(&self, pins: &PinSet) -> Result<(), ScheduleError> {
        for task in self.graph.tasks() {
            let Some(pinned_start) = pins.start_of(&task.id) else {
                continue;
            };
            for dep in &task.dependencies {
                if let Some(dep_end) = pins.end_of(dep) {
                    if pinned_start <= dep_end {
                        return Err(ScheduleError::InconsistentPin {
                            task_id: task.id.clone(),
                            dependency_id: dep.clone(),
                            pinned_start,
                            dependency_end: dep_end,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
