use super::forward_pass::{EarliestTimes, ForwardPass};
use crate::error::{ScheduleError, ScheduleResult};
use crate::graph::TaskGraph;
use crate::task::Task;
use tracing::debug;

/// Backtrace the longest dependency chain from the forward-pass results.
///
/// The terminal task is the first one (in computation order) holding the
/// maximum earliest finish. From there the walk repeatedly steps to the first
/// `depends_on` entry whose finish is strictly greater than every earlier
/// entry in the same list, until it reaches a task with no known dependency.
pub fn critical_path(graph: &TaskGraph<'_>, times: &EarliestTimes) -> ScheduleResult<Vec<String>> {
    let Some((terminal, _)) = times.terminal() else {
        return Ok(Vec::new());
    };

    let mut path: Vec<String> = Vec::new();
    let mut current = Some(terminal.to_string());

    while let Some(task_id) = current.take() {
        let task = graph
            .task(&task_id)
            .ok_or_else(|| ScheduleError::inconsistent(&task_id))?;
        if times.get(&task_id).is_none() {
            return Err(ScheduleError::inconsistent(&task_id));
        }
        if path.len() >= graph.len() {
            // a repeat means the offsets did not come from an acyclic walk
            return Err(ScheduleError::inconsistent(&task_id));
        }
        path.push(task_id.clone());

        if !graph.has_known_dependency(&task_id) {
            break;
        }

        let mut best: Option<(&str, u64)> = None;
        for dep_id in task.depends_on.iter().filter(|dep| graph.contains(dep)) {
            let finish = times
                .earliest_finish(dep_id)
                .ok_or_else(|| ScheduleError::inconsistent(dep_id))?;
            if best.is_none_or(|(_, max_finish)| finish > max_finish) {
                best = Some((dep_id.as_str(), finish));
            }
        }
        current = best.map(|(dep_id, _)| dep_id.to_string());
    }

    path.reverse();
    Ok(path)
}

/// Runs ordering, the forward pass and the backtrace over one graph.
pub struct CriticalPathCalculator<'g, 'a> {
    graph: &'g TaskGraph<'a>,
}

impl<'g, 'a> CriticalPathCalculator<'g, 'a> {
    pub fn new(graph: &'g TaskGraph<'a>) -> Self {
        Self { graph }
    }

    pub fn calculate(&self) -> ScheduleResult<Vec<String>> {
        let order = self.graph.topological_order()?;
        let times = ForwardPass::new(self.graph).execute(&order)?;
        let path = critical_path(self.graph, &times)?;
        debug!(path = ?path, duration = times.project_duration(), "critical path found");
        Ok(path)
    }
}

/// Builds a graph over `tasks` and returns its critical path.
pub fn calculate_critical_path(tasks: &[Task]) -> ScheduleResult<Vec<String>> {
    let graph = TaskGraph::build(tasks)?;
    CriticalPathCalculator::new(&graph).calculate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_ties_go_to_list_order() {
        // B and C both finish at 3; D lists C first.
        let tasks = vec![
            Task::new("A", 1),
            Task::new("B", 2).with_dependencies(["A"]),
            Task::new("C", 2).with_dependencies(["A"]),
            Task::new("D", 1).with_dependencies(["C", "B"]),
        ];
        assert_eq!(
            calculate_critical_path(&tasks).unwrap(),
            vec!["A", "C", "D"]
        );
    }

    #[test]
    fn path_stops_at_task_with_only_unknown_dependencies() {
        let tasks = vec![
            Task::new("A", 4).with_dependencies(["external"]),
            Task::new("B", 1).with_dependencies(["A"]),
        ];
        assert_eq!(calculate_critical_path(&tasks).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn missing_offsets_surface_as_inconsistent_schedule() {
        let tasks = vec![
            Task::new("A", 1),
            Task::new("B", 1).with_dependencies(["A"]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        // B computed without A ever being processed
        let times = ForwardPass::new(&graph)
            .execute(&["B".to_string()])
            .unwrap();
        match critical_path(&graph, &times) {
            Err(ScheduleError::InconsistentSchedule { task_id }) => assert_eq!(task_id, "A"),
            other => panic!("expected inconsistent schedule, got {other:?}"),
        }
    }

    #[test]
    fn empty_set_has_empty_path() {
        assert!(calculate_critical_path(&[]).unwrap().is_empty());
    }
}
