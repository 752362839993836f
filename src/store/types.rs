use crate::api::{Agent, OrchestratorStatus, Task};
use crate::error::{ConsoleError, Operation};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which collection a refresh targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Agents,
    Tasks,
    Status,
}

impl Collection {
    pub fn operation(&self) -> Operation {
        match self {
            Collection::Agents => Operation::ListAgents,
            Collection::Tasks => Operation::ListTasks,
            Collection::Status => Operation::OrchestratorStatus,
        }
    }
}

/// A refresh that did not land; the previous snapshot stayed in place.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshFailure {
    pub collection: Collection,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl RefreshFailure {
    pub fn new(collection: Collection, error: &ConsoleError) -> Self {
        Self {
            collection,
            message: error.to_string(),
            occurred_at: Utc::now(),
        }
    }
}

/// Everything the store holds, copied out in one read.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub agents: Vec<Agent>,
    pub tasks: Vec<Task>,
    pub status: Option<OrchestratorStatus>,
}
