//! Dependency-driven project scheduling.
//!
//! A task set flows through four pure stages: the [`graph`] builder and
//! topological orderer, the forward pass with critical-path backtrace, the
//! calendar date assigner, and the deadline validator. [`Scheduler`] runs
//! them end to end.

pub mod calculations;
pub mod calendar;
pub mod dates;
pub mod error;
pub mod graph;
pub mod report;
pub mod schedule;
pub mod task;
pub(crate) mod task_validation;
pub mod validation;

pub use calculations::critical_path::{
    CriticalPathCalculator, calculate_critical_path, critical_path,
};
pub use calculations::date_assignment::{DateAssigner, DatedSchedule, TaskDates, assign_dates};
pub use calculations::forward_pass::{EarliestTimes, ForwardPass, TaskOffsets};
pub use calendar::{CalendarConfig, WorkCalendar};
pub use dates::{format_date, parse_date};
pub use error::{ScheduleError, ScheduleResult};
pub use graph::{TaskGraph, TopologicalOrder, UnknownReference, topological_order};
pub use report::{load_plan_request, read_plan_request, render_table, to_json, write_csv};
pub use schedule::{
    Constraints, PlanOptions, PlanOutcome, PlanRequest, ScheduleSummary, Scheduler, plan_batch,
};
pub use task::{Priority, ScheduledTask, Task, TaskStatus};
pub use validation::{ConstraintReport, validate_deadline};
