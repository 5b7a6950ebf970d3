use std::io;
use thiserror::Error;

/// Failures the scheduling engine reports to its caller.
///
/// Calendar and deadline parsing problems are not errors: they degrade to
/// skipped dates or advisory warnings. Everything here is fatal to the call.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid task {task_id:?}: {reason}")]
    InvalidTask { task_id: String, reason: String },

    #[error("duplicate task id {0}")]
    DuplicateTaskId(String),

    #[error("cyclic dependency: tasks {} could not be ordered", .tasks.join(", "))]
    CyclicDependency { tasks: Vec<String> },

    #[error("inconsistent schedule: task {task_id} referenced but not ordered")]
    InconsistentSchedule { task_id: String },

    #[error("date out of range: task {task_id} finishes past the last supported date")]
    DateOutOfRange { task_id: String },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScheduleError {
    pub(crate) fn invalid_task(task_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTask {
            task_id: task_id.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn inconsistent(task_id: impl Into<String>) -> Self {
        Self::InconsistentSchedule {
            task_id: task_id.into(),
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
