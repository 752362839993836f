pub mod types;
pub mod workflow;

pub use types::{WorkflowPhase, WorkflowView};
pub use workflow::AnalysisWorkflow;
