use super::types::*;
use super::RemoteService;
use crate::error::{ConsoleError, Operation, RemoteCause};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP accessor for the orchestration service.
pub struct OrchestratorApiClient {
    client: Client,
    base_url: String,
}

impl OrchestratorApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response, ConsoleError> {
        debug!(%operation, "Sending request");
        let response = request
            .send()
            .await
            .map_err(|e| ConsoleError::transport(operation, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ConsoleError::status(operation, status.as_u16(), body))
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, operation: Operation, request: RequestBuilder) -> Result<T, ConsoleError> {
        let response = self.send(operation, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ConsoleError::remote(operation, RemoteCause::Decode(e.to_string())))
    }
}

#[async_trait]
impl RemoteService for OrchestratorApiClient {
    async fn list_agents(&self) -> Result<Vec<Agent>, ConsoleError> {
        let request = self.client.get(self.url("/agents"));
        self.fetch(Operation::ListAgents, request).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ConsoleError> {
        let request = self.client.get(self.url("/tasks"));
        self.fetch(Operation::ListTasks, request).await
    }

    async fn orchestrator_status(&self) -> Result<OrchestratorStatus, ConsoleError> {
        let request = self.client.get(self.url("/orchestrator/status"));
        self.fetch(Operation::OrchestratorStatus, request).await
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ConsoleError> {
        request.validate()?;
        let builder = self.client.post(self.url("/tasks")).json(&request);
        self.fetch(Operation::CreateTask, builder).await
    }

    async fn execute_task(&self, task_id: i64) -> Result<(), ConsoleError> {
        let request = self.client.post(self.url(&format!("/tasks/{}/execute", task_id)));
        self.send(Operation::ExecuteTask, request).await?;
        Ok(())
    }

    async fn analyze_request(&self, request: &str) -> Result<AnalysisResult, ConsoleError> {
        if request.trim().is_empty() {
            return Err(ConsoleError::validation("analysis request text is required"));
        }
        let body = AnalyzeRequest {
            request: request.to_string(),
        };
        let builder = self.client.post(self.url("/orchestrator/analyze")).json(&body);
        self.fetch(Operation::AnalyzeRequest, builder).await
    }

    async fn execute_plan(&self, tasks: &[SuggestedTask]) -> Result<(), ConsoleError> {
        let body = ExecutePlanRequest {
            tasks: tasks.to_vec(),
        };
        let request = self.client.post(self.url("/orchestrator/execute-plan")).json(&body);
        self.send(Operation::ExecutePlan, request).await?;
        Ok(())
    }
}
