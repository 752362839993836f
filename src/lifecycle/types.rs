use crate::api::{CreateTaskRequest, DEFAULT_TASK_PRIORITY};
use crate::catalog::TaskType;
use crate::error::ConsoleError;
use serde::{Deserialize, Serialize};

/// The "new task" form as the user has filled it in so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub task_type: Option<TaskType>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, task_type: Option<TaskType>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            task_type,
        }
    }

    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && self.task_type.as_ref().map_or(false, |t| !t.is_blank())
    }

    pub fn to_request(&self) -> Result<CreateTaskRequest, ConsoleError> {
        let task_type = self
            .task_type
            .clone()
            .ok_or_else(|| ConsoleError::validation("task type is required"))?;
        CreateTaskRequest::new(self.title.clone(), self.description.clone(), task_type, DEFAULT_TASK_PRIORITY)
    }
}

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Required input missing; the service was not contacted.
    Skipped,
    Created { task_id: i64 },
}
