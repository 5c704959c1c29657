use chrono::NaiveDate;
use sprint_planner::task::{EstimatedTime, Task};
use sprint_planner::{
    PinSet, Planner, ProjectMetadata, ScheduleError, SprintConfig, TaskGraph, WorkCalendar,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn task(id: &str, days: u32, deps: &[&str]) -> Task {
    let mut task = Task::new(id, format!("work item {id}"), EstimatedTime::days(days));
    task.dependencies = deps.iter().map(|d| d.to_string()).collect();
    task
}

fn metadata(start: NaiveDate, end: NaiveDate) -> ProjectMetadata {
    ProjectMetadata::new("Test project", start, end)
}

/// Monday project start: A (2 days) runs Mon-Tue, B (3 days, after A) starts
/// Wednesday and ends Friday.
#[test]
fn chain_of_two_tasks_lands_on_expected_days() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 17)));
    let graph = TaskGraph::build(vec![task("A", 2, &[]), task("B", 3, &["A"])]).unwrap();

    let run = planner.schedule(&graph).unwrap();
    let a = run.schedule.get("A").unwrap();
    let b = run.schedule.get("B").unwrap();

    assert_eq!((a.start, a.end), (d(2025, 1, 6), d(2025, 1, 7)));
    assert_eq!((b.start, b.end), (d(2025, 1, 8), d(2025, 1, 10)));
}

#[test]
fn dependencies_finish_strictly_before_dependents_start() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 2, 28)));
    let graph = TaskGraph::build(vec![
        task("T1", 2, &[]),
        task("T2", 3, &["T1"]),
        task("T3", 1, &["T1"]),
        task("T4", 2, &["T2", "T3"]),
    ])
    .unwrap();

    let run = planner.schedule(&graph).unwrap();
    for t in graph.tasks() {
        let dates = run.schedule.get(&t.id).unwrap();
        assert!(dates.start <= dates.end, "task {} runs backwards", t.id);
        for dep in &t.dependencies {
            let dep_dates = run.schedule.get(dep).unwrap();
            assert!(
                dep_dates.end < dates.start,
                "dependency {dep} must finish before {} starts",
                t.id
            );
        }
    }
}

#[test]
fn holidays_push_task_dates_out() {
    let calendar = WorkCalendar::with_holidays([d(2025, 1, 7)]);
    let planner =
        Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 17))).with_calendar(calendar);
    let graph = TaskGraph::build(vec![task("A", 3, &[])]).unwrap();

    let run = planner.schedule(&graph).unwrap();
    let a = run.schedule.get("A").unwrap();
    // Mon, (holiday Tue), Wed, Thu.
    assert_eq!((a.start, a.end), (d(2025, 1, 6), d(2025, 1, 9)));
}

#[test]
fn scheduling_twice_yields_identical_schedules() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 2, 28)));
    let graph = TaskGraph::build(vec![
        task("T1", 2, &[]),
        task("T2", 5, &["T1"]),
        task("T3", 3, &["T1"]),
        task("T4", 1, &["T2", "T3"]),
    ])
    .unwrap();

    let first = planner.schedule(&graph).unwrap();
    let second = planner.schedule(&graph).unwrap();
    assert_eq!(first.schedule, second.schedule);
    assert_eq!(first.sprint_plan, second.sprint_plan);
}

#[test]
fn sprint_label_delays_start_to_its_window() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 17)))
        .with_sprint_config(SprintConfig::Weekly);
    let mut late = task("L", 2, &[]);
    late.sprint = Some("Sprint 2".into());
    let graph = TaskGraph::build(vec![task("E", 2, &[]), late]).unwrap();

    let run = planner.schedule(&graph).unwrap();
    let window2 = run.sprint_plan.window(2).unwrap().clone();
    assert_eq!(window2.start, d(2025, 1, 13));

    let l = run.schedule.get("L").unwrap();
    assert_eq!(l.start, window2.start);
    // The unlabeled task defaults to sprint 1.
    assert_eq!(run.schedule.get("E").unwrap().start, d(2025, 1, 6));
}

#[test]
fn overflow_appends_sprints_instead_of_failing() {
    // One 10-day task in a one-week plan: the timeline extends.
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 10)))
        .with_sprint_config(SprintConfig::Weekly);
    let graph = TaskGraph::build(vec![task("big", 10, &[])]).unwrap();

    let run = planner.schedule(&graph).unwrap();
    let big = run.schedule.get("big").unwrap();
    assert_eq!(big.end, d(2025, 1, 17));
    assert!(run.sprint_plan.len() >= 2);
    assert!(!run.summary.extensions.is_empty());
    assert_eq!(run.summary.extensions[0].triggered_by, "big");
    assert!(run.sprint_plan.end().unwrap() >= big.end);
}

#[test]
fn sprint_label_beyond_plan_extends_it() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 10)))
        .with_sprint_config(SprintConfig::Weekly);
    let mut far = task("far", 1, &[]);
    far.sprint = Some("Sprint 3".into());
    let graph = TaskGraph::build(vec![far]).unwrap();

    let run = planner.schedule(&graph).unwrap();
    assert_eq!(run.sprint_plan.len(), 3);
    assert_eq!(
        run.schedule.get("far").unwrap().start,
        run.sprint_plan.window(3).unwrap().start
    );
}

#[test]
fn zero_duration_is_rejected() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 17)));
    let graph = TaskGraph::build(vec![task("empty", 0, &[])]).unwrap();

    let err = planner.schedule(&graph).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::InvalidDuration { ref task_id, .. } if task_id == "empty"
    ));
}

#[test]
fn hour_estimates_round_up_to_working_days() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 17)));
    let mut quick = Task::new("quick", "short item", EstimatedTime::hours(12));
    quick.dependencies = Vec::new();
    let graph = TaskGraph::build(vec![quick]).unwrap();

    // 12 hours -> 2 working days.
    let run = planner.schedule(&graph).unwrap();
    let dates = run.schedule.get("quick").unwrap();
    assert_eq!((dates.start, dates.end), (d(2025, 1, 6), d(2025, 1, 7)));
}

#[test]
fn pinned_start_holds_task_in_place_and_shifts_successors() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 2, 28)));
    let graph = TaskGraph::build(vec![task("A", 2, &[]), task("B", 2, &["A"])]).unwrap();

    let mut pins = PinSet::new();
    pins.pin_start("A", d(2025, 1, 13));

    let run = planner.reschedule(&graph, &pins).unwrap();
    let a = run.schedule.get("A").unwrap();
    let b = run.schedule.get("B").unwrap();
    // A holds at its pin; unpinned B moves after it.
    assert_eq!((a.start, a.end), (d(2025, 1, 13), d(2025, 1, 14)));
    assert_eq!((b.start, b.end), (d(2025, 1, 15), d(2025, 1, 16)));
}

#[test]
fn pin_is_a_lower_bound_not_a_cap() {
    // A's computed finish pushes B past its pin.
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 2, 28)));
    let graph = TaskGraph::build(vec![task("A", 5, &[]), task("B", 2, &["A"])]).unwrap();

    let mut pins = PinSet::new();
    pins.pin_start("B", d(2025, 1, 7));

    let run = planner.reschedule(&graph, &pins).unwrap();
    // A runs Mon Jan 6 - Fri Jan 10, so B cannot start Jan 7.
    assert_eq!(run.schedule.get("B").unwrap().start, d(2025, 1, 13));
}

#[test]
fn weekend_pin_snaps_to_next_working_day() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 2, 28)));
    let graph = TaskGraph::build(vec![task("A", 1, &[])]).unwrap();

    let mut pins = PinSet::new();
    pins.pin_start("A", d(2025, 1, 11)); // Saturday

    let run = planner.reschedule(&graph, &pins).unwrap();
    assert_eq!(run.schedule.get("A").unwrap().start, d(2025, 1, 13));
}

#[test]
fn contradictory_pins_fail_without_a_schedule() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 2, 28)));
    let graph = TaskGraph::build(vec![task("Y", 3, &[]), task("X", 2, &["Y"])]).unwrap();

    let mut pins = PinSet::new();
    pins.pin_end("Y", d(2025, 1, 10));
    pins.pin_start("X", d(2025, 1, 8)); // before Y's pinned end

    let err = planner.reschedule(&graph, &pins).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::InconsistentPin {
            task_id: "X".into(),
            dependency_id: "Y".into(),
            pinned_start: d(2025, 1, 8),
            dependency_end: d(2025, 1, 10),
        }
    );
}

#[test]
fn summary_reflects_the_run() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 17)));
    let graph = TaskGraph::build(vec![task("A", 2, &[]), task("B", 3, &["A"])]).unwrap();

    let run = planner.schedule(&graph).unwrap();
    assert_eq!(run.summary.task_count, 2);
    assert_eq!(run.summary.latest_finish, Some(d(2025, 1, 10)));
    assert!(run.summary.to_summary_line().starts_with("tasks=2"));
}

#[test]
fn applying_schedule_fills_task_dates() {
    let planner = Planner::new(metadata(d(2025, 1, 6), d(2025, 1, 17)));
    let mut tasks = vec![task("A", 2, &[]), task("B", 1, &["A"])];
    let graph = TaskGraph::build(tasks.clone()).unwrap();

    let run = planner.schedule(&graph).unwrap();
    run.schedule.apply_to_tasks(&mut tasks);

    assert_eq!(tasks[0].start, Some(d(2025, 1, 6)));
    assert_eq!(tasks[0].end, Some(d(2025, 1, 7)));
    assert_eq!(tasks[1].start, Some(d(2025, 1, 8)));
    assert_eq!(tasks[1].end, Some(d(2025, 1, 8)));
}
