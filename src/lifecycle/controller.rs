use super::types::*;
use crate::api::RemoteService;
use crate::error::ConsoleError;
use crate::store::DomainStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Creates and executes tasks, then re-syncs the store.
///
/// Task status is never changed locally; the store only sees a transition
/// once the service reports it on the next refresh.
pub struct TaskLifecycleController {
    remote: Arc<dyn RemoteService>,
    store: Arc<DomainStore>,
    draft: Arc<RwLock<TaskDraft>>,
    last_error: Arc<RwLock<Option<ConsoleError>>>,
}

impl TaskLifecycleController {
    pub fn new(remote: Arc<dyn RemoteService>, store: Arc<DomainStore>) -> Self {
        Self {
            remote,
            store,
            draft: Arc::new(RwLock::new(TaskDraft::default())),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn draft(&self) -> TaskDraft {
        self.draft.read().await.clone()
    }

    pub async fn set_draft(&self, draft: TaskDraft) {
        *self.draft.write().await = draft;
    }

    pub async fn last_error(&self) -> Option<ConsoleError> {
        self.last_error.read().await.clone()
    }

    /// Submits the current draft with the default priority.
    ///
    /// Incomplete drafts are a no-op. The draft is cleared only once the
    /// service has accepted the task; on failure it stays as entered.
    pub async fn submit_new_task(&self) -> Result<SubmitOutcome, ConsoleError> {
        let draft = self.draft().await;
        if !draft.is_submittable() {
            debug!("Task draft incomplete, not submitting");
            return Ok(SubmitOutcome::Skipped);
        }

        let request = draft.to_request()?;
        match self.remote.create_task(request).await {
            Ok(task) => {
                info!(task_id = task.id, task_type = %task.task_type, "Task created");
                *self.draft.write().await = TaskDraft::default();
                *self.last_error.write().await = None;
                self.store.refresh_after_mutation().await;
                Ok(SubmitOutcome::Created { task_id: task.id })
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Sends a pending task for execution.
    pub async fn run_task(&self, task_id: i64) -> Result<(), ConsoleError> {
        let task = self
            .store
            .task(task_id)
            .await
            .ok_or_else(|| ConsoleError::validation(format!("task {} is not in the current snapshot", task_id)))?;
        if !task.status.is_executable() {
            return Err(ConsoleError::validation(format!(
                "task {} is {}, only pending tasks can be executed",
                task_id, task.status
            )));
        }

        match self.remote.execute_task(task_id).await {
            Ok(()) => {
                info!(task_id, "Task execution started");
                *self.last_error.write().await = None;
                self.store.refresh_after_mutation().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    async fn fail(&self, error: ConsoleError) -> ConsoleError {
        warn!(error = %error, "Task operation failed");
        *self.last_error.write().await = Some(error.clone());
        error
    }
}
