use crate::catalog::{AgentStatus, TaskStatus, TaskType};
use crate::error::ConsoleError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Priority the console attaches to every task it creates.
pub const DEFAULT_TASK_PRIORITY: i64 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: TaskType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "capabilities_or_default")]
    pub capabilities: AgentCapabilities,
    pub status: AgentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Free-form capability blob stored by the service. Only `languages` and
/// `availability` are interpreted; values of an unexpected shape decode to
/// empty rather than failing the whole agent list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentCapabilities {
    #[serde(default, deserialize_with = "languages_or_empty")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "availability_or_none")]
    pub availability: Option<String>,
    /// Capability keys the console does not interpret.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

fn capabilities_or_default<'de, D>(deserializer: D) -> Result<AgentCapabilities, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn languages_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let languages = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(language) => Some(language),
                _ => None,
            })
            .collect(),
        Value::String(language) if !language.is_empty() => vec![language],
        _ => Vec::new(),
    };
    Ok(languages)
}

fn availability_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let availability = match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    };
    Ok(availability)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub task_type: TaskType,
    #[serde(default)]
    pub priority: i64,
    pub status: TaskStatus,
    #[serde(default)]
    pub agent_id: Option<i64>,
    #[serde(default)]
    pub parent_task_id: Option<i64>,
    #[serde(default)]
    pub parameters: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Aggregate counts reported by the service at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorStatus {
    #[serde(default)]
    pub agent_statistics: BTreeMap<String, u64>,
    #[serde(default)]
    pub task_statistics: BTreeMap<String, u64>,
    #[serde(default)]
    pub recent_activity: Vec<Task>,
    #[serde(default)]
    pub system_health: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub priority: i64,
}

impl CreateTaskRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        task_type: TaskType,
        priority: i64,
    ) -> Result<Self, ConsoleError> {
        let request = Self {
            title: title.into(),
            description: description.into(),
            task_type,
            priority,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.title.trim().is_empty() {
            return Err(ConsoleError::validation("task title is required"));
        }
        if self.task_type.is_blank() {
            return Err(ConsoleError::validation("task type is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub request: String,
}

/// A task proposed by the analysis endpoint; not yet a real task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", alias = "task_type")]
    pub task_type: TaskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, alias = "original_request")]
    pub analysis: String,
    #[serde(default)]
    pub suggested_tasks: Vec<SuggestedTask>,
    #[serde(default)]
    pub coordination_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutePlanRequest {
    pub tasks: Vec<SuggestedTask>,
}
