use crate::error::{ScheduleError, ScheduleResult};
use crate::task::Task;
use std::collections::HashSet;

/// Longest single task the planner accepts, in working days.
pub const MAX_DURATION_DAYS: u32 = 30;

pub fn validate_task(task: &Task) -> ScheduleResult<()> {
    if task.id.trim().is_empty() {
        return Err(ScheduleError::invalid_task(&task.id, "task id must not be empty"));
    }

    if task.duration_days == 0 {
        return Err(ScheduleError::invalid_task(
            &task.id,
            "duration_days must be at least 1",
        ));
    }

    if task.duration_days > MAX_DURATION_DAYS {
        return Err(ScheduleError::invalid_task(
            &task.id,
            format!("duration_days must be at most {MAX_DURATION_DAYS}"),
        ));
    }

    if !task.confidence.is_finite() || !(0.0..=1.0).contains(&task.confidence) {
        return Err(ScheduleError::invalid_task(
            &task.id,
            format!(
                "confidence {} must be between 0 and 1",
                task.confidence
            ),
        ));
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> ScheduleResult<()> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id.as_str()) {
            return Err(ScheduleError::DuplicateTaskId(task.id.clone()));
        }
        validate_task(task)?;
    }
    Ok(())
}
