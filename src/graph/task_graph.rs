use crate::error::ScheduleResult;
use crate::task::Task;
use crate::task_validation::validate_task_collection;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::debug;

/// A dependency reference to an id that is not part of the task set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReference {
    pub task_id: String,
    pub missing_id: String,
}

/// Validated, indexed view over a borrowed task set.
///
/// Edges run dependency -> dependent and are added in task-set order, then in
/// `depends_on` order, so edge indices encode the caller's ordering.
pub struct TaskGraph<'a> {
    tasks: &'a [Task],
    pub graph: DiGraph<usize, ()>,
    id_to_index: HashMap<&'a str, NodeIndex>,
    unknown_references: Vec<UnknownReference>,
}

impl<'a> TaskGraph<'a> {
    pub fn build(tasks: &'a [Task]) -> ScheduleResult<Self> {
        validate_task_collection(tasks)?;

        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut id_to_index: HashMap<&'a str, NodeIndex> = HashMap::with_capacity(tasks.len());

        // Add nodes first
        for (position, task) in tasks.iter().enumerate() {
            let node_ix = graph.add_node(position);
            id_to_index.insert(task.id.as_str(), node_ix);
        }

        // Add edges: dependency -> task
        let mut unknown_references = Vec::new();
        for task in tasks {
            let task_ix = id_to_index[task.id.as_str()];
            for dep_id in &task.depends_on {
                match id_to_index.get(dep_id.as_str()) {
                    Some(&dep_ix) => {
                        graph.add_edge(dep_ix, task_ix, ());
                    }
                    None => {
                        debug!(
                            task = %task.id,
                            dependency = %dep_id,
                            "ignoring unknown dependency"
                        );
                        unknown_references.push(UnknownReference {
                            task_id: task.id.clone(),
                            missing_id: dep_id.clone(),
                        });
                    }
                }
            }
        }

        debug!(
            tasks = graph.node_count(),
            edges = graph.edge_count(),
            "task graph built"
        );

        Ok(Self {
            tasks,
            graph,
            id_to_index,
            unknown_references,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in the order they were supplied.
    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    pub fn task(&self, id: &str) -> Option<&'a Task> {
        self.id_to_index
            .get(id)
            .map(|&ix| &self.tasks[self.graph[ix]])
    }

    pub(crate) fn node(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    pub(crate) fn task_at(&self, ix: NodeIndex) -> &'a Task {
        &self.tasks[self.graph[ix]]
    }

    /// `depends_on` entries that name tasks in this set, in list order.
    pub fn known_dependencies(&self, id: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.task(id)
            .into_iter()
            .flat_map(|task| task.depends_on.iter())
            .map(String::as_str)
            .filter(|dep_id| self.contains(dep_id))
    }

    pub fn has_known_dependency(&self, id: &str) -> bool {
        self.known_dependencies(id).next().is_some()
    }

    /// Tasks that depend on `id`, in the order their edges were added.
    pub fn dependents(&self, id: &str) -> Vec<&'a str> {
        match self.node(id) {
            Some(ix) => self
                .dependent_nodes(ix)
                .into_iter()
                .map(|succ| self.task_at(succ).id.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn dependent_nodes(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        // petgraph walks adjacency lists newest-first; restore insertion order.
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(ix, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(edge_ix, _)| edge_ix.index());
        edges.into_iter().map(|(_, target)| target).collect()
    }

    pub(crate) fn in_degree(&self, ix: NodeIndex) -> usize {
        self.graph.edges_directed(ix, Direction::Incoming).count()
    }

    pub fn unknown_references(&self) -> &[UnknownReference] {
        &self.unknown_references
    }
}
