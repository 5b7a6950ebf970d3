use super::task_graph::TaskGraph;
use crate::error::{ScheduleError, ScheduleResult};
use crate::task::Task;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Outcome of Kahn's algorithm over a task graph.
///
/// `unordered` holds every task whose in-degree never reached zero, i.e. the
/// members of dependency cycles and everything downstream of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologicalOrder {
    pub ordered: Vec<String>,
    pub unordered: Vec<String>,
}

impl TopologicalOrder {
    pub fn is_complete(&self) -> bool {
        self.unordered.is_empty()
    }

    pub fn into_complete(self) -> ScheduleResult<Vec<String>> {
        if self.is_complete() {
            Ok(self.ordered)
        } else {
            warn!(tasks = ?self.unordered, "dependency cycle left tasks unordered");
            Err(ScheduleError::CyclicDependency {
                tasks: self.unordered,
            })
        }
    }
}

impl TaskGraph<'_> {
    /// Kahn's algorithm with a FIFO queue.
    ///
    /// Roots are seeded in task-set order and dependents are released in the
    /// order their edges were added. Tasks stuck on a cycle are left out of
    /// `ordered` rather than reported; use [`TaskGraph::topological_order`]
    /// when an incomplete order must be an error.
    pub fn kahn_order(&self) -> TopologicalOrder {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|ix| self.in_degree(ix))
            .collect();

        let mut queue: VecDeque<_> = self
            .graph
            .node_indices()
            .filter(|ix| in_degree[ix.index()] == 0)
            .collect();

        let mut ordered = Vec::with_capacity(self.len());
        while let Some(current) = queue.pop_front() {
            ordered.push(self.task_at(current).id.clone());

            for succ in self.dependent_nodes(current) {
                let degree = &mut in_degree[succ.index()];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }

        let unordered: Vec<String> = self
            .graph
            .node_indices()
            .filter(|ix| in_degree[ix.index()] > 0)
            .map(|ix| self.task_at(ix).id.clone())
            .collect();

        debug!(
            ordered = ordered.len(),
            unordered = unordered.len(),
            "topological order computed"
        );

        TopologicalOrder { ordered, unordered }
    }

    /// Dependency-respecting order of every task, or `CyclicDependency`.
    pub fn topological_order(&self) -> ScheduleResult<Vec<String>> {
        self.kahn_order().into_complete()
    }
}

/// Builds a graph over `tasks` and returns its complete topological order.
pub fn topological_order(tasks: &[Task]) -> ScheduleResult<Vec<String>> {
    TaskGraph::build(tasks)?.topological_order()
}
