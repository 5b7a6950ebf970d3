use chrono::{Datelike, NaiveDate, Weekday};
use plan_scheduler::{DateAssigner, Task, TaskGraph, WorkCalendar, assign_dates};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn one_day_task_finishes_next_working_day() {
    let tasks = vec![Task::new("T1", 1)];
    let cal = WorkCalendar::default();

    let monday = assign_dates(&tasks, &cal, d(2025, 1, 6)).unwrap();
    assert_eq!(monday.get("T1").unwrap().start_date, d(2025, 1, 6));
    assert_eq!(monday.get("T1").unwrap().finish_date, d(2025, 1, 7));

    let friday = assign_dates(&tasks, &cal, d(2025, 1, 3)).unwrap();
    assert_eq!(friday.get("T1").unwrap().finish_date, d(2025, 1, 6));
}

#[test]
fn chain_starts_on_predecessor_finish_date() {
    // T1(2d) -> {T2(3d), T3(1d)} -> T4(2d), starting Monday 2025-01-06
    let tasks = vec![
        Task::new("T1", 2),
        Task::new("T2", 3).with_dependencies(["T1"]),
        Task::new("T3", 1).with_dependencies(["T1"]),
        Task::new("T4", 2).with_dependencies(["T2", "T3"]),
    ];
    let graph = TaskGraph::build(&tasks).unwrap();
    let order = graph.topological_order().unwrap();
    let cal = WorkCalendar::default();
    let schedule = DateAssigner::new(&graph, &cal)
        .execute(&order, d(2025, 1, 6))
        .unwrap();

    let dates = |id: &str| {
        let t = schedule.get(id).unwrap();
        (t.start_date, t.finish_date)
    };
    assert_eq!(dates("T1"), (d(2025, 1, 6), d(2025, 1, 8)));
    assert_eq!(dates("T2"), (d(2025, 1, 8), d(2025, 1, 13)));
    assert_eq!(dates("T3"), (d(2025, 1, 8), d(2025, 1, 9)));
    assert_eq!(dates("T4"), (d(2025, 1, 13), d(2025, 1, 15)));
    assert_eq!(schedule.latest_finish(), Some(d(2025, 1, 15)));
}

#[test]
fn blackout_dates_push_finish_out() {
    let tasks = vec![Task::new("T1", 2)];
    let mut cal = WorkCalendar::default();
    cal.add_unavailable_date(d(2025, 1, 7));
    cal.add_unavailable_date(d(2025, 1, 8));
    let schedule = assign_dates(&tasks, &cal, d(2025, 1, 6)).unwrap();
    assert_eq!(schedule.get("T1").unwrap().finish_date, d(2025, 1, 10));
}

#[test]
fn finish_dates_are_always_working_days() {
    let tasks: Vec<Task> = (1..=12)
        .map(|i| {
            let task = Task::new(format!("T{i}"), (i % 4) + 1);
            if i > 1 {
                task.with_dependencies([format!("T{}", i - 1)])
            } else {
                task
            }
        })
        .collect();
    let mut cal = WorkCalendar::default();
    cal.add_unavailable_date(d(2025, 1, 15));
    cal.add_unavailable_date(d(2025, 1, 20));

    let schedule = assign_dates(&tasks, &cal, d(2025, 1, 10)).unwrap();
    assert_eq!(schedule.len(), tasks.len());
    for (id, dates) in schedule.iter() {
        assert!(cal.is_working_day(dates.finish_date), "{id} finishes on a non-working day");
        assert_ne!(dates.finish_date.weekday(), Weekday::Sat);
        assert!(dates.finish_date > dates.start_date);
    }
}

#[test]
fn unknown_dependencies_start_on_anchor() {
    let tasks = vec![Task::new("T1", 1).with_dependencies(["elsewhere"])];
    let schedule = assign_dates(&tasks, &WorkCalendar::default(), d(2025, 1, 8)).unwrap();
    assert_eq!(schedule.get("T1").unwrap().start_date, d(2025, 1, 8));
}
