use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One of the remote service operations the console can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListAgents,
    ListTasks,
    OrchestratorStatus,
    CreateTask,
    ExecuteTask,
    AnalyzeRequest,
    ExecutePlan,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListAgents => "list_agents",
            Operation::ListTasks => "list_tasks",
            Operation::OrchestratorStatus => "orchestrator_status",
            Operation::CreateTask => "create_task",
            Operation::ExecuteTask => "execute_task",
            Operation::AnalyzeRequest => "analyze_request",
            Operation::ExecutePlan => "execute_plan",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a remote call did not produce a usable result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteCause {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("service responded with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    /// Required input was missing; nothing was sent to the service.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{operation} failed: {cause}")]
    Remote {
        operation: Operation,
        #[source]
        cause: RemoteCause,
    },
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }

    pub fn remote(operation: Operation, cause: RemoteCause) -> Self {
        ConsoleError::Remote { operation, cause }
    }

    pub fn transport(operation: Operation, message: impl Into<String>) -> Self {
        Self::remote(operation, RemoteCause::Transport(message.into()))
    }

    pub fn status(operation: Operation, code: u16, body: impl Into<String>) -> Self {
        Self::remote(
            operation,
            RemoteCause::Status {
                code,
                body: body.into(),
            },
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }

    /// The failed operation, if the error came from the remote service.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ConsoleError::Remote { operation, .. } => Some(*operation),
            ConsoleError::Validation(_) => None,
        }
    }
}
