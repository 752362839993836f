use crate::api::AnalysisResult;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Idle,
    Analyzing,
    Proposed,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct WorkflowInner {
    pub request_text: String,
    pub pending: Option<AnalysisResult>,
}

impl WorkflowInner {
    pub fn phase(&self, analyzing: bool) -> WorkflowPhase {
        if analyzing {
            WorkflowPhase::Analyzing
        } else if self.pending.is_some() {
            WorkflowPhase::Proposed
        } else {
            WorkflowPhase::Idle
        }
    }

    pub fn view(&self, analyzing: bool) -> WorkflowView {
        WorkflowView {
            phase: self.phase(analyzing),
            request_text: self.request_text.clone(),
            pending: self.pending.clone(),
        }
    }
}

/// Counts an analysis call as in flight until dropped, including when the
/// calling future is cancelled mid-request.
pub(crate) struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    pub fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// What the orchestration tab renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowView {
    pub phase: WorkflowPhase,
    pub request_text: String,
    pub pending: Option<AnalysisResult>,
}
