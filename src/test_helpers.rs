#[cfg(test)]
pub use mocks::*;

#[cfg(test)]
pub mod mocks {
    use crate::api::*;
    use crate::catalog::{AgentStatus, TaskStatus, TaskType};
    use crate::error::{ConsoleError, Operation};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    pub fn agent(id: i64, status: &str) -> Agent {
        Agent {
            id,
            name: format!("agent-{}", id),
            agent_type: TaskType::Text,
            description: None,
            capabilities: AgentCapabilities::default(),
            status: AgentStatus::from(status.to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn task(id: i64, status: &str) -> Task {
        Task {
            id,
            title: format!("task-{}", id),
            description: Some(String::new()),
            task_type: TaskType::Text,
            priority: 1,
            status: TaskStatus::from(status.to_string()),
            agent_id: None,
            parent_task_id: None,
            parameters: None,
            result: None,
            error_message: None,
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }

    pub fn suggested(title: &str, task_type: TaskType) -> SuggestedTask {
        SuggestedTask {
            title: title.to_string(),
            description: format!("{} description", title),
            task_type,
            priority: Some(2),
        }
    }

    pub fn analysis(tasks: Vec<SuggestedTask>) -> AnalysisResult {
        AnalysisResult {
            analysis: "analysis".to_string(),
            suggested_tasks: tasks,
            coordination_strategy: "Sequential execution with shared context".to_string(),
        }
    }

    /// Scriptable remote that counts calls per operation and can be told to
    /// fail specific operations with a transport error.
    pub struct RecordingRemote {
        agents: RwLock<Vec<Agent>>,
        tasks: RwLock<Vec<Task>>,
        analysis: RwLock<Option<AnalysisResult>>,
        calls: Mutex<HashMap<Operation, usize>>,
        failing: Mutex<HashSet<Operation>>,
        stalled: Mutex<HashSet<Operation>>,
        created: Mutex<Vec<CreateTaskRequest>>,
        plans: Mutex<Vec<Vec<SuggestedTask>>>,
        analyzed: Mutex<Vec<String>>,
    }

    impl RecordingRemote {
        pub fn new() -> Self {
            Self {
                agents: RwLock::new(Vec::new()),
                tasks: RwLock::new(Vec::new()),
                analysis: RwLock::new(None),
                calls: Mutex::new(HashMap::new()),
                failing: Mutex::new(HashSet::new()),
                stalled: Mutex::new(HashSet::new()),
                created: Mutex::new(Vec::new()),
                plans: Mutex::new(Vec::new()),
                analyzed: Mutex::new(Vec::new()),
            }
        }

        pub async fn set_agents(&self, agents: Vec<Agent>) {
            *self.agents.write().await = agents;
        }

        pub async fn set_tasks(&self, tasks: Vec<Task>) {
            *self.tasks.write().await = tasks;
        }

        pub async fn set_analysis(&self, result: AnalysisResult) {
            *self.analysis.write().await = Some(result);
        }

        pub fn fail(&self, operation: Operation) {
            self.failing.lock().unwrap().insert(operation);
        }

        pub fn recover(&self, operation: Operation) {
            self.failing.lock().unwrap().remove(&operation);
        }

        /// Makes the operation hang forever after it has been counted.
        pub fn stall(&self, operation: Operation) {
            self.stalled.lock().unwrap().insert(operation);
        }

        pub fn calls(&self, operation: Operation) -> usize {
            self.calls.lock().unwrap().get(&operation).copied().unwrap_or(0)
        }

        pub fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().values().sum()
        }

        pub fn reset_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        pub fn created_requests(&self) -> Vec<CreateTaskRequest> {
            self.created.lock().unwrap().clone()
        }

        pub fn executed_plans(&self) -> Vec<Vec<SuggestedTask>> {
            self.plans.lock().unwrap().clone()
        }

        pub fn analyzed_requests(&self) -> Vec<String> {
            self.analyzed.lock().unwrap().clone()
        }

        async fn hang_if_stalled(&self, operation: Operation) {
            let stalled = self.stalled.lock().unwrap().contains(&operation);
            if stalled {
                std::future::pending::<()>().await;
            }
        }

        fn record(&self, operation: Operation) -> Result<(), ConsoleError> {
            *self.calls.lock().unwrap().entry(operation).or_insert(0) += 1;
            if self.failing.lock().unwrap().contains(&operation) {
                Err(ConsoleError::transport(operation, "connection refused"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl RemoteService for RecordingRemote {
        async fn list_agents(&self) -> Result<Vec<Agent>, ConsoleError> {
            self.record(Operation::ListAgents)?;
            Ok(self.agents.read().await.clone())
        }

        async fn list_tasks(&self) -> Result<Vec<Task>, ConsoleError> {
            self.record(Operation::ListTasks)?;
            Ok(self.tasks.read().await.clone())
        }

        async fn orchestrator_status(&self) -> Result<OrchestratorStatus, ConsoleError> {
            self.record(Operation::OrchestratorStatus)?;
            let mut status = OrchestratorStatus::default();
            for agent in self.agents.read().await.iter() {
                *status.agent_statistics.entry(agent.status.to_string()).or_insert(0) += 1;
            }
            for task in self.tasks.read().await.iter() {
                *status.task_statistics.entry(task.status.to_string()).or_insert(0) += 1;
            }
            Ok(status)
        }

        async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ConsoleError> {
            request.validate()?;
            self.record(Operation::CreateTask)?;
            self.created.lock().unwrap().push(request.clone());

            let mut tasks = self.tasks.write().await;
            let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let mut created = task(id, "pending");
            created.title = request.title;
            created.description = Some(request.description);
            created.task_type = request.task_type;
            created.priority = request.priority;
            tasks.insert(0, created.clone());
            Ok(created)
        }

        async fn execute_task(&self, task_id: i64) -> Result<(), ConsoleError> {
            self.record(Operation::ExecuteTask)?;
            let mut tasks = self.tasks.write().await;
            match tasks.iter_mut().find(|t| t.id == task_id) {
                Some(task) => {
                    task.status = TaskStatus::InProgress;
                    Ok(())
                }
                None => Err(ConsoleError::status(Operation::ExecuteTask, 404, "not found")),
            }
        }

        async fn analyze_request(&self, request: &str) -> Result<AnalysisResult, ConsoleError> {
            if request.trim().is_empty() {
                return Err(ConsoleError::validation("analysis request text is required"));
            }
            self.record(Operation::AnalyzeRequest)?;
            self.hang_if_stalled(Operation::AnalyzeRequest).await;
            self.analyzed.lock().unwrap().push(request.to_string());
            let scripted = self.analysis.read().await.clone();
            Ok(scripted.unwrap_or_else(|| analysis(vec![suggested(request, TaskType::Text)])))
        }

        async fn execute_plan(&self, tasks: &[SuggestedTask]) -> Result<(), ConsoleError> {
            self.record(Operation::ExecutePlan)?;
            self.plans.lock().unwrap().push(tasks.to_vec());
            Ok(())
        }
    }
}
