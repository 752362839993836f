use super::types::*;
use crate::api::{AnalysisResult, RemoteService};
use crate::error::ConsoleError;
use crate::store::DomainStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Analyze request -> review proposed plan -> execute plan.
///
/// At most one plan is held. A successful analysis replaces whatever was
/// pending; there is no separate reject step.
pub struct AnalysisWorkflow {
    remote: Arc<dyn RemoteService>,
    store: Arc<DomainStore>,
    inner: Arc<RwLock<WorkflowInner>>,
    in_flight: Arc<AtomicUsize>,
    last_error: Arc<RwLock<Option<ConsoleError>>>,
}

impl AnalysisWorkflow {
    pub fn new(remote: Arc<dyn RemoteService>, store: Arc<DomainStore>) -> Self {
        Self {
            remote,
            store,
            inner: Arc::new(RwLock::new(WorkflowInner::default())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_request_text(&self, text: impl Into<String>) {
        self.inner.write().await.request_text = text.into();
    }

    pub async fn request_text(&self) -> String {
        self.inner.read().await.request_text.clone()
    }

    pub async fn phase(&self) -> WorkflowPhase {
        self.inner.read().await.phase(self.is_analyzing())
    }

    pub async fn pending_plan(&self) -> Option<AnalysisResult> {
        self.inner.read().await.pending.clone()
    }

    pub async fn view(&self) -> WorkflowView {
        self.inner.read().await.view(self.is_analyzing())
    }

    fn is_analyzing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn last_error(&self) -> Option<ConsoleError> {
        self.last_error.read().await.clone()
    }

    /// Analyzes the current request text. Blank text is a no-op.
    ///
    /// On failure whatever was held before stays held.
    pub async fn submit_analysis(&self) -> Result<Option<AnalysisResult>, ConsoleError> {
        let (text, in_flight) = {
            let inner = self.inner.read().await;
            if inner.request_text.trim().is_empty() {
                debug!("Analysis request empty, not submitting");
                return Ok(None);
            }
            (inner.request_text.clone(), InFlightGuard::enter(&self.in_flight))
        };

        let outcome = self.remote.analyze_request(&text).await;

        let mut inner = self.inner.write().await;
        drop(in_flight);
        match outcome {
            Ok(result) => {
                info!(suggested = result.suggested_tasks.len(), "Plan proposed");
                inner.pending = Some(result.clone());
                drop(inner);
                *self.last_error.write().await = None;
                Ok(Some(result))
            }
            Err(e) => {
                drop(inner);
                Err(self.fail(e).await)
            }
        }
    }

    /// Executes the proposed plan, returning to idle on success.
    pub async fn accept_plan(&self) -> Result<(), ConsoleError> {
        let plan = self
            .pending_plan()
            .await
            .ok_or_else(|| ConsoleError::validation("no proposed plan to execute"))?;

        match self.remote.execute_plan(&plan.suggested_tasks).await {
            Ok(()) => {
                info!(tasks = plan.suggested_tasks.len(), "Plan executed");
                {
                    let mut inner = self.inner.write().await;
                    inner.pending = None;
                    inner.request_text.clear();
                }
                *self.last_error.write().await = None;
                self.store.refresh_after_mutation().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    async fn fail(&self, error: ConsoleError) -> ConsoleError {
        warn!(error = %error, "Analysis workflow step failed");
        *self.last_error.write().await = Some(error.clone());
        error
    }
}
