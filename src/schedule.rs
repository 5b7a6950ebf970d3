use crate::calculations::critical_path::critical_path;
use crate::calculations::date_assignment::{DateAssigner, DatedSchedule};
use crate::calculations::forward_pass::{EarliestTimes, ForwardPass};
use crate::calendar::{CalendarConfig, WorkCalendar};
use crate::error::ScheduleResult;
use crate::graph::TaskGraph;
use crate::task::{ScheduledTask, Task};
use crate::validation::{ConstraintReport, validate_deadline};
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

fn default_no_work_on_weekends() -> bool {
    true
}

/// Constraints as the planning layer supplies them alongside a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default = "default_no_work_on_weekends")]
    pub no_work_on_weekends: bool,
    #[serde(default)]
    pub unavailable_dates: Vec<String>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            deadline: None,
            no_work_on_weekends: default_no_work_on_weekends(),
            unavailable_dates: Vec::new(),
        }
    }
}

impl Constraints {
    pub fn calendar_config(&self) -> CalendarConfig {
        CalendarConfig {
            skip_weekends: self.no_work_on_weekends,
            unavailable_dates: self.unavailable_dates.clone(),
        }
    }
}

/// A task set plus its optional constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub constraints: Option<Constraints>,
}

impl PlanRequest {
    pub fn options(&self, anchor: Option<NaiveDate>) -> PlanOptions {
        let constraints = self.constraints.clone().unwrap_or_default();
        PlanOptions {
            calendar: constraints.calendar_config(),
            deadline: constraints.deadline,
            anchor,
        }
    }

    pub fn plan(&self, anchor: Option<NaiveDate>) -> ScheduleResult<PlanOutcome> {
        Scheduler::from_options(&self.options(anchor)).plan(&self.tasks)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub deadline: Option<String>,
    /// Day the project starts; today when absent.
    #[serde(default)]
    pub anchor: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub task_count: usize,
    pub critical_path: Vec<String>,
    pub project_duration_days: u64,
    pub anchor: NaiveDate,
    pub latest_finish: Option<NaiveDate>,
    pub warning_count: usize,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("duration={}d", self.project_duration_days));
        parts.push(format!("start={}", self.anchor));
        if let Some(date) = self.latest_finish {
            parts.push(format!("finish={}", date));
        }
        if !self.critical_path.is_empty() {
            parts.push(format!("critical={}", self.critical_path.join("->")));
        }
        if self.warning_count > 0 {
            parts.push(format!("warnings={}", self.warning_count));
        }
        parts.join(", ")
    }
}

/// Everything one planning call produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub anchor: NaiveDate,
    pub order: Vec<String>,
    pub critical_path: Vec<String>,
    pub offsets: EarliestTimes,
    pub schedule: DatedSchedule,
    pub report: ConstraintReport,
    pub tasks: Vec<ScheduledTask>,
}

impl PlanOutcome {
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            task_count: self.tasks.len(),
            critical_path: self.critical_path.clone(),
            project_duration_days: self.offsets.project_duration(),
            anchor: self.anchor,
            latest_finish: self.schedule.latest_finish(),
            warning_count: self.report.warnings.len(),
        }
    }
}

/// Stateless planning engine configured with a calendar, deadline and anchor.
#[derive(Debug, Clone)]
pub struct Scheduler {
    calendar: WorkCalendar,
    deadline: Option<String>,
    anchor: NaiveDate,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_options(&PlanOptions::default())
    }
}

impl Scheduler {
    pub fn new(calendar: WorkCalendar, deadline: Option<String>, anchor: NaiveDate) -> Self {
        Self {
            calendar,
            deadline,
            anchor,
        }
    }

    pub fn from_options(options: &PlanOptions) -> Self {
        let anchor = options
            .anchor
            .unwrap_or_else(|| Local::now().date_naive());
        Self::new(
            WorkCalendar::from_config(&options.calendar),
            options.deadline.clone(),
            anchor,
        )
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn deadline(&self) -> Option<&str> {
        self.deadline.as_deref()
    }

    /// Order, time, date and check one task set.
    pub fn plan(&self, tasks: &[Task]) -> ScheduleResult<PlanOutcome> {
        let graph = TaskGraph::build(tasks)?;
        let order = graph.topological_order()?;

        let offsets = ForwardPass::new(&graph).execute(&order)?;
        let path = critical_path(&graph, &offsets)?;
        let schedule = DateAssigner::new(&graph, &self.calendar).execute(&order, self.anchor)?;
        let report = validate_deadline(&schedule, self.deadline());

        debug!(
            tasks = tasks.len(),
            valid = report.is_valid,
            "plan computed"
        );

        Ok(PlanOutcome {
            anchor: self.anchor,
            order,
            critical_path: path,
            tasks: schedule.apply_to(tasks),
            offsets,
            schedule,
            report,
        })
    }
}

/// Plan independent task sets in parallel.
///
/// Results line up with `requests`; one failing set does not affect others.
pub fn plan_batch(
    requests: &[PlanRequest],
    anchor: Option<NaiveDate>,
) -> Vec<ScheduleResult<PlanOutcome>> {
    let anchor = anchor.unwrap_or_else(|| Local::now().date_naive());
    info!(requests = requests.len(), %anchor, "planning batch");
    requests
        .par_iter()
        .map(|request| request.plan(Some(anchor)))
        .collect()
}
