use crate::calculations::date_assignment::DatedSchedule;
use crate::dates::{format_date, parse_date};
use serde::Serialize;
use tracing::debug;

/// Advisory result of checking a dated schedule against caller constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintReport {
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

impl ConstraintReport {
    fn from_warnings(warnings: Vec<String>) -> Self {
        Self {
            is_valid: warnings.is_empty(),
            warnings,
        }
    }
}

/// Compare the latest finish in `schedule` against an optional deadline.
///
/// Never fails: an unreadable deadline becomes a warning. The schedule is not
/// modified.
pub fn validate_deadline(schedule: &DatedSchedule, deadline: Option<&str>) -> ConstraintReport {
    let Some(raw) = deadline else {
        return ConstraintReport::from_warnings(Vec::new());
    };

    let mut warnings = Vec::new();
    match parse_date(raw) {
        None => warnings.push(format!("Invalid deadline format: {raw}")),
        Some(deadline_date) => {
            if let Some(latest_finish) = schedule.latest_finish() {
                if latest_finish > deadline_date {
                    let days_over = (latest_finish - deadline_date).num_days();
                    warnings.push(format!(
                        "Project will finish {days_over} days after deadline. \
                         Expected finish: {}, Deadline: {raw}",
                        format_date(latest_finish)
                    ));
                }
            }
        }
    }

    debug!(warnings = warnings.len(), "deadline checked");
    ConstraintReport::from_warnings(warnings)
}
