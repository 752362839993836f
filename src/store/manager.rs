use super::types::*;
use crate::api::{Agent, OrchestratorStatus, RemoteService, Task};
use crate::catalog::{AgentStatus, TaskStatus};
use crate::error::ConsoleError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Last synchronized view of the remote service.
///
/// Each collection is replaced wholesale on a successful refresh and left
/// untouched on failure. Counts are derived on every read.
pub struct DomainStore {
    remote: Arc<dyn RemoteService>,
    agents: Arc<RwLock<Vec<Agent>>>,
    tasks: Arc<RwLock<Vec<Task>>>,
    status: Arc<RwLock<Option<OrchestratorStatus>>>,
    last_failure: Arc<RwLock<Option<RefreshFailure>>>,
}

impl DomainStore {
    pub fn new(remote: Arc<dyn RemoteService>) -> Self {
        Self {
            remote,
            agents: Arc::new(RwLock::new(Vec::new())),
            tasks: Arc::new(RwLock::new(Vec::new())),
            status: Arc::new(RwLock::new(None)),
            last_failure: Arc::new(RwLock::new(None)),
        }
    }

    /// Startup sync: agents, tasks and status fetched concurrently, each
    /// applied on its own as it lands.
    pub async fn initialize(&self) {
        let (agents, tasks, status) = tokio::join!(self.refresh_agents(), self.refresh_tasks(), self.refresh_status());
        debug!(
            agents_ok = agents.is_ok(),
            tasks_ok = tasks.is_ok(),
            status_ok = status.is_ok(),
            "Initial refresh finished"
        );
    }

    pub async fn refresh_agents(&self) -> Result<(), ConsoleError> {
        match self.remote.list_agents().await {
            Ok(agents) => {
                debug!(count = agents.len(), "Agents refreshed");
                *self.agents.write().await = agents;
                self.clear_failure(Collection::Agents).await;
                Ok(())
            }
            Err(e) => Err(self.record_failure(Collection::Agents, e).await),
        }
    }

    pub async fn refresh_tasks(&self) -> Result<(), ConsoleError> {
        match self.remote.list_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "Tasks refreshed");
                *self.tasks.write().await = tasks;
                self.clear_failure(Collection::Tasks).await;
                Ok(())
            }
            Err(e) => Err(self.record_failure(Collection::Tasks, e).await),
        }
    }

    pub async fn refresh_status(&self) -> Result<(), ConsoleError> {
        match self.remote.orchestrator_status().await {
            Ok(status) => {
                *self.status.write().await = Some(status);
                self.clear_failure(Collection::Status).await;
                Ok(())
            }
            Err(e) => Err(self.record_failure(Collection::Status, e).await),
        }
    }

    /// Re-sync after a successful mutation. Agent availability can change
    /// as a side effect of scheduling, so both collections are fetched.
    pub async fn refresh_after_mutation(&self) {
        let _ = tokio::join!(self.refresh_tasks(), self.refresh_agents());
    }

    pub async fn refresh_all(&self) {
        self.initialize().await;
    }

    async fn record_failure(&self, collection: Collection, error: ConsoleError) -> ConsoleError {
        warn!(operation = %collection.operation(), error = %error, "Refresh failed, keeping previous snapshot");
        *self.last_failure.write().await = Some(RefreshFailure::new(collection, &error));
        error
    }

    async fn clear_failure(&self, collection: Collection) {
        let mut last_failure = self.last_failure.write().await;
        if last_failure.as_ref().map(|f| f.collection) == Some(collection) {
            *last_failure = None;
        }
    }

    pub async fn agents(&self) -> Vec<Agent> {
        self.agents.read().await.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn status(&self) -> Option<OrchestratorStatus> {
        self.status.read().await.clone()
    }

    pub async fn task(&self, task_id: i64) -> Option<Task> {
        self.tasks.read().await.iter().find(|t| t.id == task_id).cloned()
    }

    pub async fn snapshot(&self) -> Snapshot {
        Snapshot {
            agents: self.agents().await,
            tasks: self.tasks().await,
            status: self.status().await,
        }
    }

    pub async fn last_failure(&self) -> Option<RefreshFailure> {
        self.last_failure.read().await.clone()
    }

    pub async fn agent_count(&self) -> usize {
        self.agents.read().await.len()
    }

    pub async fn available_agent_count(&self) -> usize {
        self.agents
            .read()
            .await
            .iter()
            .filter(|a| a.status == AgentStatus::Idle)
            .count()
    }

    pub async fn task_count_with_status(&self, status: &TaskStatus) -> usize {
        self.tasks.read().await.iter().filter(|t| &t.status == status).count()
    }

    pub async fn active_task_count(&self) -> usize {
        self.task_count_with_status(&TaskStatus::InProgress).await
    }

    pub async fn pending_task_count(&self) -> usize {
        self.task_count_with_status(&TaskStatus::Pending).await
    }

    /// Drops every snapshot; used when the session ends.
    pub async fn clear(&self) {
        self.agents.write().await.clear();
        self.tasks.write().await.clear();
        *self.status.write().await = None;
        *self.last_failure.write().await = None;
    }
}
