use crate::error::{ScheduleError, ScheduleResult};
use crate::graph::TaskGraph;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Earliest start/finish of one task, in whole days from project start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskOffsets {
    pub earliest_start: u64,
    pub earliest_finish: u64,
}

/// Offsets keyed by task id, iterated in the order they were computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarliestTimes {
    entries: Vec<(String, TaskOffsets)>,
    index: HashMap<String, usize>,
}

impl EarliestTimes {
    fn insert(&mut self, task_id: &str, offsets: TaskOffsets) {
        self.index.insert(task_id.to_string(), self.entries.len());
        self.entries.push((task_id.to_string(), offsets));
    }

    pub fn get(&self, task_id: &str) -> Option<TaskOffsets> {
        self.index.get(task_id).map(|&pos| self.entries[pos].1)
    }

    pub fn earliest_finish(&self, task_id: &str) -> Option<u64> {
        self.get(task_id).map(|offsets| offsets.earliest_finish)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TaskOffsets)> {
        self.entries
            .iter()
            .map(|(task_id, offsets)| (task_id.as_str(), *offsets))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the largest finish; ties go to the one computed first.
    pub fn terminal(&self) -> Option<(&str, TaskOffsets)> {
        let mut best: Option<(&str, TaskOffsets)> = None;
        for (task_id, offsets) in self.iter() {
            match best {
                Some((_, current)) if offsets.earliest_finish <= current.earliest_finish => {}
                _ => best = Some((task_id, offsets)),
            }
        }
        best
    }

    /// Minimum project length in days.
    pub fn project_duration(&self) -> u64 {
        self.terminal()
            .map(|(_, offsets)| offsets.earliest_finish)
            .unwrap_or(0)
    }
}

pub struct ForwardPass<'g, 'a> {
    graph: &'g TaskGraph<'a>,
}

impl<'g, 'a> ForwardPass<'g, 'a> {
    pub fn new(graph: &'g TaskGraph<'a>) -> Self {
        Self { graph }
    }

    /// Walk `order` computing earliest offsets.
    ///
    /// Each task starts at the latest finish among dependencies already
    /// processed; dependencies outside the set (or not yet seen) are ignored.
    pub fn execute(&self, order: &[String]) -> ScheduleResult<EarliestTimes> {
        let mut times = EarliestTimes::default();

        for task_id in order {
            let task = self
                .graph
                .task(task_id)
                .ok_or_else(|| ScheduleError::inconsistent(task_id))?;

            let earliest_start = self
                .graph
                .known_dependencies(task_id)
                .filter_map(|dep_id| times.earliest_finish(dep_id))
                .max()
                .unwrap_or(0);

            let earliest_finish = earliest_start + u64::from(task.duration_days);
            times.insert(
                task_id,
                TaskOffsets {
                    earliest_start,
                    earliest_finish,
                },
            );
        }

        debug!(
            tasks = times.len(),
            duration = times.project_duration(),
            "forward pass complete"
        );
        Ok(times)
    }
}
