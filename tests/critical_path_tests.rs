use plan_scheduler::{
    CriticalPathCalculator, ForwardPass, ScheduleError, Task, TaskGraph, calculate_critical_path,
    critical_path,
};

#[test]
fn longest_branch_wins() {
    let tasks = vec![
        Task::new("T1", 2),
        Task::new("T2", 3).with_dependencies(["T1"]),
        Task::new("T3", 1).with_dependencies(["T1"]),
    ];
    assert_eq!(calculate_critical_path(&tasks).unwrap(), vec!["T1", "T2"]);
}

#[test]
fn path_total_equals_project_duration() {
    let tasks = vec![
        Task::new("a", 3),
        Task::new("b", 5),
        Task::new("c", 2).with_dependencies(["a"]),
        Task::new("d", 1).with_dependencies(["b", "c"]),
        Task::new("e", 2).with_dependencies(["a"]),
    ];
    let graph = TaskGraph::build(&tasks).unwrap();
    let order = graph.topological_order().unwrap();
    let times = ForwardPass::new(&graph).execute(&order).unwrap();
    let path = critical_path(&graph, &times).unwrap();

    assert_eq!(path, vec!["b", "d"]);
    let last = path.last().unwrap();
    assert_eq!(
        times.get(last).unwrap().earliest_finish,
        times.project_duration()
    );

    // consecutive entries are direct dependency edges
    for pair in path.windows(2) {
        assert!(graph.task(&pair[1]).unwrap().depends_on.contains(&pair[0]));
    }
}

#[test]
fn terminal_ties_go_to_the_earliest_in_order() {
    // x and y both finish at day 4; x is ordered first.
    let tasks = vec![
        Task::new("x", 4),
        Task::new("y", 2),
        Task::new("z", 2).with_dependencies(["y"]),
    ];
    let graph = TaskGraph::build(&tasks).unwrap();
    assert_eq!(CriticalPathCalculator::new(&graph).calculate().unwrap(), vec!["x"]);
}

#[test]
fn cycle_is_reported_rather_than_a_partial_path() {
    let tasks = vec![
        Task::new("A", 5).with_dependencies(["B"]),
        Task::new("B", 5).with_dependencies(["A"]),
        Task::new("C", 1),
    ];
    match calculate_critical_path(&tasks) {
        Err(ScheduleError::CyclicDependency { tasks }) => {
            assert_eq!(tasks, vec!["A", "B"]);
        }
        other => panic!("expected a cycle error, got {other:?}"),
    }
}

#[test]
fn lenient_order_with_cycle_still_fails_on_lookup() {
    // C depends on a cycle member; driving the backtrace over the lenient
    // order must not quietly produce a path.
    let tasks = vec![
        Task::new("A", 1).with_dependencies(["B"]),
        Task::new("B", 1).with_dependencies(["A"]),
        Task::new("C", 3).with_dependencies(["A"]),
        Task::new("D", 1),
    ];
    let graph = TaskGraph::build(&tasks).unwrap();
    let order = graph.kahn_order();
    assert_eq!(order.ordered, vec!["D"]);

    let mut partial = order.ordered.clone();
    partial.push("C".to_string());
    let times = ForwardPass::new(&graph).execute(&partial).unwrap();
    let err = critical_path(&graph, &times).unwrap_err();
    assert!(err.to_string().starts_with("inconsistent schedule"));
}

#[test]
fn empty_input_gives_empty_path() {
    assert!(calculate_critical_path(&[]).unwrap().is_empty());
}
