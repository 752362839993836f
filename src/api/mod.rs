pub mod client;
pub mod in_memory;
pub mod types;

pub use client::OrchestratorApiClient;
pub use in_memory::InMemoryOrchestrator;
pub use types::*;

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use async_trait::async_trait;
use std::sync::Arc;

/// The remote orchestration service, one method per endpoint.
///
/// Implementations touch no local state; a failure is always reported as
/// [`ConsoleError`] and never retried.
#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn list_agents(&self) -> Result<Vec<Agent>, ConsoleError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, ConsoleError>;

    async fn orchestrator_status(&self) -> Result<OrchestratorStatus, ConsoleError>;

    /// Fails with a validation error before any I/O if the request is incomplete.
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ConsoleError>;

    /// Success is judged by HTTP status alone.
    async fn execute_task(&self, task_id: i64) -> Result<(), ConsoleError>;

    async fn analyze_request(&self, request: &str) -> Result<AnalysisResult, ConsoleError>;

    async fn execute_plan(&self, tasks: &[SuggestedTask]) -> Result<(), ConsoleError>;
}

pub fn create_remote_service(config: &ConsoleConfig) -> Arc<dyn RemoteService> {
    if config.local_mode {
        tracing::info!("Local mode enabled, using in-memory orchestrator");
        Arc::new(InMemoryOrchestrator::with_default_roster().with_locale(config.locale))
    } else {
        tracing::info!(api_base = %config.api_base, "Using remote orchestrator");
        Arc::new(OrchestratorApiClient::new(&config.api_base))
    }
}
