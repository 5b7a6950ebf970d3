use chrono::NaiveDate;
use plan_scheduler::{DatedSchedule, Task, WorkCalendar, assign_dates, validate_deadline};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_schedule() -> DatedSchedule {
    // finishes Wednesday 2025-01-15
    let tasks = vec![
        Task::new("T1", 5),
        Task::new("T2", 2).with_dependencies(["T1"]),
    ];
    assign_dates(&tasks, &WorkCalendar::default(), d(2025, 1, 6)).unwrap()
}

#[test]
fn no_deadline_is_always_valid() {
    let report = validate_deadline(&sample_schedule(), None);
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn deadline_after_finish_is_valid() {
    let report = validate_deadline(&sample_schedule(), Some("2025-01-31"));
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn deadline_on_finish_day_is_valid() {
    assert!(validate_deadline(&sample_schedule(), Some("2025-01-15")).is_valid);
}

#[test]
fn missed_deadline_produces_one_warning_with_overage() {
    let report = validate_deadline(&sample_schedule(), Some("2025-01-10"));
    assert!(!report.is_valid);
    assert_eq!(
        report.warnings,
        vec![
            "Project will finish 5 days after deadline. \
             Expected finish: 2025-01-15, Deadline: 2025-01-10"
                .to_string()
        ]
    );
}

#[test]
fn unparsable_deadline_is_a_warning_not_an_error() {
    let report = validate_deadline(&sample_schedule(), Some("end of Q1"));
    assert!(!report.is_valid);
    assert_eq!(report.warnings, vec!["Invalid deadline format: end of Q1".to_string()]);
}

#[test]
fn empty_schedule_with_deadline_is_valid() {
    let report = validate_deadline(&DatedSchedule::default(), Some("2000-01-01"));
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}
