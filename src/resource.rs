use crate::schedule::Schedule;
use crate::task::Task;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Two tasks assigned to the same resource with overlapping scheduled dates.
/// `task_a` is the earlier-starting task; each overlapping pair is reported
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConflict {
    pub resource: String,
    pub task_a: String,
    pub task_b: String,
    pub overlap_start: NaiveDate,
    pub overlap_end: NaiveDate,
}

/// Task id -> resource name mapping taken from the assignment sheet. Tasks
/// without a resource are exempt from conflict checking.
pub fn assignments_from_tasks(tasks: &[Task]) -> HashMap<String, String> {
    tasks
        .iter()
        .filter_map(|task| {
            task.resource
                .as_ref()
                .map(|resource| (task.id.clone(), resource.clone()))
        })
        .collect()
}

/// Flag overlapping date intervals per resource, closed-interval semantics:
/// a task ending the same day another starts is a conflict, consistent with
/// inclusive working-day durations. O(k log k) per resource for k tasks.
pub fn find_conflicts(
    assignments: &HashMap<String, String>,
    schedule: &Schedule,
) -> Vec<ResourceConflict> {
    // Group scheduled intervals by resource.
    let mut by_resource: HashMap<&str, Vec<(&str, NaiveDate, NaiveDate)>> = HashMap::new();
    for (task_id, resource) in assignments {
        if resource.trim().is_empty() {
            continue;
        }
        if let Some(dates) = schedule.get(task_id) {
            by_resource
                .entry(resource.as_str())
                .or_default()
                .push((task_id.as_str(), dates.start, dates.end));
        }
    }

    let mut groups: Vec<(&str, Vec<(&str, NaiveDate, NaiveDate)>)> =
        by_resource.into_iter().collect();
    groups.sort_by_key(|(resource, _)| *resource);

    // Each resource scans independently.
    let mut conflicts: Vec<ResourceConflict> = groups
        .into_par_iter()
        .flat_map(|(resource, mut intervals)| {
            intervals.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
            let mut found = Vec::new();
            for i in 0..intervals.len() {
                let (id_a, start_a, end_a) = intervals[i];
                for &(id_b, start_b, end_b) in &intervals[i + 1..] {
                    // Sorted by start, so once a later task starts after this
                    // one ends, no further pair can overlap.
                    if start_b > end_a {
                        break;
                    }
                    found.push(ResourceConflict {
                        resource: resource.to_string(),
                        task_a: id_a.to_string(),
                        task_b: id_b.to_string(),
                        overlap_start: start_b.max(start_a),
                        overlap_end: end_a.min(end_b),
                    });
                }
            }
            found
        })
        .collect();

    conflicts.sort_by(|a, b| {
        a.resource
            .cmp(&b.resource)
            .then_with(|| a.task_a.cmp(&b.task_a))
            .then_with(|| a.task_b.cmp(&b.task_b))
    });
    conflicts
}
