use crate::analysis::AnalysisWorkflow;
use crate::api::{create_remote_service, RemoteService};
use crate::config::ConsoleConfig;
use crate::dashboard::{self, AgentCard, DashboardSummary, StatusOverview, TaskRow};
use crate::lifecycle::TaskLifecycleController;
use crate::store::DomainStore;
use std::sync::Arc;
use tracing::info;

/// One application session: the store plus the controllers that share it.
///
/// Built explicitly at startup and torn down at exit; nothing here is global.
pub struct ConsoleSession {
    config: ConsoleConfig,
    store: Arc<DomainStore>,
    tasks: TaskLifecycleController,
    analysis: AnalysisWorkflow,
}

impl ConsoleSession {
    pub fn new(config: ConsoleConfig) -> Self {
        let remote = create_remote_service(&config);
        Self::with_remote(config, remote)
    }

    pub fn with_remote(config: ConsoleConfig, remote: Arc<dyn RemoteService>) -> Self {
        let store = Arc::new(DomainStore::new(remote.clone()));
        Self {
            tasks: TaskLifecycleController::new(remote.clone(), store.clone()),
            analysis: AnalysisWorkflow::new(remote, store.clone()),
            store,
            config,
        }
    }

    /// Initial sync of agents, tasks and status. There is no polling after this.
    pub async fn start(&self) {
        info!(api_base = %self.config.api_base, "Starting console session");
        self.store.initialize().await;
    }

    pub async fn shutdown(&self) {
        info!("Shutting down console session");
        self.store.clear().await;
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<DomainStore> {
        &self.store
    }

    pub fn tasks(&self) -> &TaskLifecycleController {
        &self.tasks
    }

    pub fn analysis(&self) -> &AnalysisWorkflow {
        &self.analysis
    }

    pub async fn dashboard(&self) -> DashboardSummary {
        let snapshot = self.store.snapshot().await;
        dashboard::summarize(&snapshot, self.config.locale, self.config.recent_activity_limit)
    }

    pub async fn agent_cards(&self) -> Vec<AgentCard> {
        self.store
            .agents()
            .await
            .iter()
            .map(|a| dashboard::agent_card(a, self.config.locale))
            .collect()
    }

    pub async fn task_rows(&self) -> Vec<TaskRow> {
        self.store
            .tasks()
            .await
            .iter()
            .map(|t| dashboard::task_row(t, self.config.locale))
            .collect()
    }

    pub async fn status_overview(&self) -> Option<StatusOverview> {
        self.store.status().await.as_ref().map(dashboard::status_overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryOrchestrator;
    use crate::catalog::TaskType;
    use crate::lifecycle::{SubmitOutcome, TaskDraft};

    async fn setup_session() -> ConsoleSession {
        let session = ConsoleSession::with_remote(
            ConsoleConfig::default(),
            Arc::new(InMemoryOrchestrator::with_default_roster()),
        );
        session.start().await;
        session
    }

    #[tokio::test]
    async fn test_start_populates_store() {
        let session = setup_session().await;

        let summary = session.dashboard().await;

        assert_eq!(summary.total_agents, 6);
        assert_eq!(summary.available_agents, 6);
        assert!(session.status_overview().await.is_some());
    }

    #[tokio::test]
    async fn test_create_then_execute_flow() {
        let session = setup_session().await;
        session
            .tasks()
            .set_draft(TaskDraft::new("Landing page copy", "", Some(TaskType::Text)))
            .await;

        let outcome = session.tasks().submit_new_task().await.unwrap();
        let SubmitOutcome::Created { task_id } = outcome else {
            panic!("task was not created");
        };
        assert_eq!(session.dashboard().await.pending_tasks, 1);
        assert_eq!(session.dashboard().await.available_agents, 5);

        session.tasks().run_task(task_id).await.unwrap();

        let summary = session.dashboard().await;
        assert_eq!(summary.pending_tasks, 0);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.available_agents, 6);
        assert!(session.tasks().run_task(task_id).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_plan_flow_creates_tasks() {
        let session = setup_session().await;
        session.analysis().set_request_text("Need article text and a logo design").await;

        let plan = session.analysis().submit_analysis().await.unwrap().unwrap();
        session.analysis().accept_plan().await.unwrap();

        let rows = session.task_rows().await;
        assert_eq!(rows.len(), plan.suggested_tasks.len());
        assert!(rows.iter().all(|row| row.can_execute));
        assert_eq!(session.analysis().request_text().await, "");
    }

    #[tokio::test]
    async fn test_shutdown_clears_store() {
        let session = setup_session().await;

        session.shutdown().await;

        assert_eq!(session.dashboard().await.total_agents, 0);
        assert!(session.status_overview().await.is_none());
    }
}
