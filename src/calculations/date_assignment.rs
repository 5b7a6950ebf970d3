use crate::calendar::WorkCalendar;
use crate::dates::format_date;
use crate::error::{ScheduleError, ScheduleResult};
use crate::graph::TaskGraph;
use crate::task::{ScheduledTask, Task};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskDates {
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
}

/// Calendar dates keyed by task id, iterated in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatedSchedule {
    entries: Vec<(String, TaskDates)>,
    index: HashMap<String, usize>,
}

impl DatedSchedule {
    fn insert(&mut self, task_id: &str, dates: TaskDates) {
        self.index.insert(task_id.to_string(), self.entries.len());
        self.entries.push((task_id.to_string(), dates));
    }

    pub fn get(&self, task_id: &str) -> Option<TaskDates> {
        self.index.get(task_id).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TaskDates)> {
        self.entries
            .iter()
            .map(|(task_id, dates)| (task_id.as_str(), *dates))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest_finish(&self) -> Option<NaiveDate> {
        self.entries.iter().map(|(_, dates)| dates.finish_date).max()
    }

    /// Copies of `tasks` with `earliest_start` / `latest_finish` filled in.
    /// Tasks this schedule has no dates for keep `None`.
    pub fn apply_to(&self, tasks: &[Task]) -> Vec<ScheduledTask> {
        tasks
            .iter()
            .map(|task| {
                let dates = self.get(&task.id);
                ScheduledTask {
                    task: task.clone(),
                    earliest_start: dates.map(|d| format_date(d.start_date)),
                    latest_finish: dates.map(|d| format_date(d.finish_date)),
                }
            })
            .collect()
    }
}

pub struct DateAssigner<'g, 'a> {
    graph: &'g TaskGraph<'a>,
    calendar: &'g WorkCalendar,
}

impl<'g, 'a> DateAssigner<'g, 'a> {
    pub fn new(graph: &'g TaskGraph<'a>, calendar: &'g WorkCalendar) -> Self {
        Self { graph, calendar }
    }

    /// Walk `order` turning durations into calendar dates.
    ///
    /// Roots start on `anchor`. Other tasks start on the latest finish among
    /// their already-dated dependencies, never earlier than `anchor`. Finish is
    /// `duration_days` working days after the start, the start day excluded.
    /// A finish past the end of the calendar is `DateOutOfRange`.
    pub fn execute(&self, order: &[String], anchor: NaiveDate) -> ScheduleResult<DatedSchedule> {
        let mut schedule = DatedSchedule::default();

        for task_id in order {
            let task = self
                .graph
                .task(task_id)
                .ok_or_else(|| ScheduleError::inconsistent(task_id))?;

            let start_date = self
                .graph
                .known_dependencies(task_id)
                .filter_map(|dep_id| schedule.get(dep_id).map(|dates| dates.finish_date))
                .fold(anchor, NaiveDate::max);

            let finish_date = self
                .calendar
                .add_working_days(start_date, task.duration_days)
                .ok_or_else(|| ScheduleError::DateOutOfRange {
                    task_id: task_id.clone(),
                })?;
            schedule.insert(
                task_id,
                TaskDates {
                    start_date,
                    finish_date,
                },
            );
        }

        debug!(
            tasks = schedule.len(),
            latest_finish = ?schedule.latest_finish(),
            "calendar dates assigned"
        );
        Ok(schedule)
    }
}

/// Builds a graph over `tasks`, orders it and assigns calendar dates.
pub fn assign_dates(
    tasks: &[Task],
    calendar: &WorkCalendar,
    anchor: NaiveDate,
) -> ScheduleResult<DatedSchedule> {
    let graph = TaskGraph::build(tasks)?;
    let order = graph.topological_order()?;
    DateAssigner::new(&graph, calendar).execute(&order, anchor)
}
