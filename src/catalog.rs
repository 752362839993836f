use serde::{Deserialize, Serialize};
use std::fmt;

/// Which label set the panel renders task types with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    English,
    Norwegian,
}

/// Task type / agent capability category.
///
/// The six known categories form a closed set. Anything else the service
/// sends is carried verbatim in `Other` and rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    Text,
    Visual,
    Code,
    Workflow,
    CustomerService,
    Sales,
    Other(String),
}

impl TaskType {
    pub const KNOWN: [TaskType; 6] = [
        TaskType::Text,
        TaskType::Visual,
        TaskType::Code,
        TaskType::Workflow,
        TaskType::CustomerService,
        TaskType::Sales,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TaskType::Text => "text",
            TaskType::Visual => "visual",
            TaskType::Code => "code",
            TaskType::Workflow => "workflow",
            TaskType::CustomerService => "customer_service",
            TaskType::Sales => "sales",
            TaskType::Other(value) => value.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TaskType::Other(_))
    }

    /// True for an unset selection (empty or whitespace-only value).
    pub fn is_blank(&self) -> bool {
        matches!(self, TaskType::Other(value) if value.trim().is_empty())
    }

    /// Display label; unknown values fall back to their raw string.
    pub fn label(&self, locale: Locale) -> &str {
        match (locale, self) {
            (_, TaskType::Other(value)) => value.as_str(),
            (Locale::English, TaskType::Text) => "Text Generation",
            (Locale::English, TaskType::Visual) => "Visual Content",
            (Locale::English, TaskType::Code) => "Code & Integration",
            (Locale::English, TaskType::Workflow) => "Workflow Orchestration",
            (Locale::English, TaskType::CustomerService) => "Customer Service",
            (Locale::English, TaskType::Sales) => "Sales & Marketing",
            (Locale::Norwegian, TaskType::Text) => "Tekstgenerering",
            (Locale::Norwegian, TaskType::Visual) => "Visuelt innhold",
            (Locale::Norwegian, TaskType::Code) => "Koding & integrasjon",
            (Locale::Norwegian, TaskType::Workflow) => "Workflow",
            (Locale::Norwegian, TaskType::CustomerService) => "Kundeservice",
            (Locale::Norwegian, TaskType::Sales) => "Salg & markedsføring",
        }
    }
}

impl From<&str> for TaskType {
    fn from(value: &str) -> Self {
        match value {
            "text" => TaskType::Text,
            "visual" => TaskType::Visual,
            "code" => TaskType::Code,
            "workflow" => TaskType::Workflow,
            "customer_service" => TaskType::CustomerService,
            "sales" => TaskType::Sales,
            other => TaskType::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskType {
    fn from(value: String) -> Self {
        TaskType::from(value.as_str())
    }
}

impl From<TaskType> for String {
    fn from(value: TaskType) -> Self {
        match value {
            TaskType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option shown in the task type picker.
#[derive(Debug, Clone, Serialize)]
pub struct TaskTypeOption {
    pub value: String,
    pub label: String,
}

pub fn task_type_options(locale: Locale) -> Vec<TaskTypeOption> {
    TaskType::KNOWN
        .iter()
        .map(|task_type| TaskTypeOption {
            value: task_type.as_str().to_string(),
            label: task_type.label(locale).to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentStatus {
    Idle,
    Busy,
    Error,
    Other(String),
}

impl AgentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Busy => "busy",
            AgentStatus::Error => "error",
            AgentStatus::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for AgentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "idle" => AgentStatus::Idle,
            "busy" => AgentStatus::Busy,
            "error" => AgentStatus::Error,
            _ => AgentStatus::Other(value),
        }
    }
}

impl From<AgentStatus> for String {
    fn from(value: AgentStatus) -> Self {
        match value {
            AgentStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status as reported by the service. The console never assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
            TaskStatus::Other(value) => value.as_str(),
        }
    }

    /// Only pending tasks can be sent for execution.
    pub fn is_executable(&self) -> bool {
        matches!(self, TaskStatus::Pending)
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => TaskStatus::Pending,
            "in_progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            "failed" => TaskStatus::Failed,
            _ => TaskStatus::Other(value),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
