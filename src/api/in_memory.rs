use super::types::*;
use super::RemoteService;
use crate::catalog::{AgentStatus, Locale, TaskStatus, TaskType};
use crate::error::{ConsoleError, Operation};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const COORDINATION_STRATEGY: &str = "Sequential execution with shared context";

struct AnalysisRule {
    task_type: TaskType,
    keywords: &'static [&'static str],
    english: (&'static str, &'static str),
    norwegian: (&'static str, &'static str),
    priority: i64,
}

impl AnalysisRule {
    fn suggest(&self, locale: Locale) -> SuggestedTask {
        let (title, description) = match locale {
            Locale::English => self.english,
            Locale::Norwegian => self.norwegian,
        };
        SuggestedTask {
            title: title.to_string(),
            description: description.to_string(),
            task_type: self.task_type.clone(),
            priority: Some(self.priority),
        }
    }
}

/// Keyword rules used to propose tasks from free text.
const ANALYSIS_RULES: [AnalysisRule; 6] = [
    AnalysisRule {
        task_type: TaskType::Text,
        keywords: &["tekst", "innhold", "skrive", "artikkel", "e-post", "text", "content", "write", "article", "email"],
        english: ("Generate text content", "Produce written content for the request"),
        norwegian: ("Generer tekstinnhold", "Lag tekstbasert innhold basert på forespørselen"),
        priority: 2,
    },
    AnalysisRule {
        task_type: TaskType::Visual,
        keywords: &["bilde", "video", "visuell", "design", "logo", "image", "visual"],
        english: ("Create visual content", "Produce images or video for the campaign"),
        norwegian: ("Lag visuelt innhold", "Generer bilder eller videoer for kampanjen"),
        priority: 2,
    },
    AnalysisRule {
        task_type: TaskType::Code,
        keywords: &["kode", "automatisering", "integrasjon", "api", "code", "integration"],
        english: ("Build code solution", "Implement the technical solution or integration"),
        norwegian: ("Utvikle kodeløsning", "Implementer teknisk løsning eller integrasjon"),
        priority: 1,
    },
    AnalysisRule {
        task_type: TaskType::Workflow,
        keywords: &["workflow", "prosess", "automatiser", "n8n", "process", "automate", "automation"],
        english: ("Set up workflow", "Configure automated workflows"),
        norwegian: ("Sett opp workflow", "Konfigurer automatiserte arbeidsflyter"),
        priority: 1,
    },
    AnalysisRule {
        task_type: TaskType::CustomerService,
        keywords: &["kunde", "service", "support", "henvendelse", "customer", "inquiry"],
        english: ("Customer service setup", "Configure AI-driven customer service"),
        norwegian: ("Kundeservice oppsett", "Konfigurer AI-drevet kundeservice"),
        priority: 3,
    },
    AnalysisRule {
        task_type: TaskType::Sales,
        keywords: &["salg", "leads", "markedsføring", "outreach", "sales", "marketing", "campaign"],
        english: ("Sales and marketing", "Run sales and marketing activities"),
        norwegian: ("Salg og markedsføring", "Implementer salgs- og markedsføringsaktiviteter"),
        priority: 3,
    },
];

/// Proposed when no keyword matches.
const FALLBACK_RULE: AnalysisRule = AnalysisRule {
    task_type: TaskType::Text,
    keywords: &[],
    english: ("Analyse request", "Analyse and plan an approach to the request"),
    norwegian: ("Analyser forespørsel", "Analyser og planlegg tilnærming til forespørselen"),
    priority: 1,
};

#[derive(Default)]
struct OrchestratorState {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    next_task_id: i64,
}

impl OrchestratorState {
    /// Marks the first idle agent of the task's type busy and returns its id.
    fn assign_agent(&mut self, task_type: &TaskType) -> Option<i64> {
        let agent = self
            .agents
            .iter_mut()
            .find(|a| &a.agent_type == task_type && a.status == AgentStatus::Idle)?;
        agent.status = AgentStatus::Busy;
        agent.updated_at = Some(now());
        Some(agent.id)
    }

    fn release_agent(&mut self, agent_id: Option<i64>) {
        if let Some(agent) = agent_id.and_then(|id| self.agents.iter_mut().find(|a| a.id == id)) {
            agent.status = AgentStatus::Idle;
            agent.updated_at = Some(now());
        }
    }

    fn insert_task(&mut self, title: String, description: String, task_type: TaskType, priority: i64) -> Task {
        self.next_task_id += 1;
        let agent_id = self.assign_agent(&task_type);
        let timestamp = now();
        let task = Task {
            id: self.next_task_id,
            title,
            description: Some(description),
            task_type,
            priority,
            status: TaskStatus::Pending,
            agent_id,
            parent_task_id: None,
            parameters: Some(json!({})),
            result: None,
            error_message: None,
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
            completed_at: None,
        };
        self.tasks.push(task.clone());
        task
    }
}

fn now() -> String {
    Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn simulated_result(task_type: &TaskType) -> serde_json::Value {
    match task_type {
        TaskType::Text => json!({"content": "Generated text content", "word_count": 150}),
        TaskType::Visual => json!({"format": "PNG", "dimensions": "800x600"}),
        TaskType::Code => json!({"language": "python", "lines": 2}),
        TaskType::Workflow => json!({"status": "created", "steps": 3}),
        TaskType::CustomerService => json!({"sentiment": "positive", "confidence": 0.95}),
        TaskType::Sales => json!({"leads_found": 25, "emails_sent": 15}),
        TaskType::Other(raw) => json!({"message": format!("Task of type {} completed successfully", raw)}),
    }
}

/// Local stand-in for the orchestration service.
///
/// Mirrors the service's observable behaviour closely enough to drive the
/// panel without a network: agent auto-assignment on create, synchronous
/// completion on execute and keyword based analysis.
pub struct InMemoryOrchestrator {
    state: Arc<RwLock<OrchestratorState>>,
    locale: Locale,
}

impl InMemoryOrchestrator {
    pub fn new() -> Self {
        Self::with_agents(Vec::new())
    }

    pub fn with_agents(agents: Vec<Agent>) -> Self {
        Self {
            state: Arc::new(RwLock::new(OrchestratorState {
                agents,
                tasks: Vec::new(),
                next_task_id: 0,
            })),
            locale: Locale::default(),
        }
    }

    /// Language of the titles and descriptions in proposed plans.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// One idle agent per known category.
    pub fn with_default_roster() -> Self {
        let names = ["Scribe", "Canvas", "Forge", "Conductor", "Concierge", "Closer"];
        let agents = TaskType::KNOWN
            .iter()
            .zip(names)
            .enumerate()
            .map(|(index, (task_type, name))| Agent {
                id: index as i64 + 1,
                name: name.to_string(),
                agent_type: task_type.clone(),
                description: Some(format!("{} agent", task_type.as_str())),
                capabilities: AgentCapabilities {
                    languages: vec!["en".to_string(), "no".to_string()],
                    availability: Some("24/7".to_string()),
                    ..Default::default()
                },
                status: AgentStatus::Idle,
                created_at: Some(now()),
                updated_at: Some(now()),
            })
            .collect();
        Self::with_agents(agents)
    }

    fn analyze(&self, text: &str) -> AnalysisResult {
        let lowered = text.to_lowercase();
        let mut suggested_tasks: Vec<SuggestedTask> = ANALYSIS_RULES
            .iter()
            .filter(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
            .map(|rule| rule.suggest(self.locale))
            .collect();

        if suggested_tasks.is_empty() {
            suggested_tasks.push(FALLBACK_RULE.suggest(self.locale));
        }

        AnalysisResult {
            analysis: format!("Identified {} task(s) for: {}", suggested_tasks.len(), text),
            suggested_tasks,
            coordination_strategy: COORDINATION_STRATEGY.to_string(),
        }
    }
}

impl Default for InMemoryOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteService for InMemoryOrchestrator {
    async fn list_agents(&self) -> Result<Vec<Agent>, ConsoleError> {
        Ok(self.state.read().await.agents.clone())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ConsoleError> {
        // Newest first, as the service orders them.
        Ok(self.state.read().await.tasks.iter().rev().cloned().collect())
    }

    async fn orchestrator_status(&self) -> Result<OrchestratorStatus, ConsoleError> {
        let state = self.state.read().await;

        let mut agent_statistics = BTreeMap::new();
        for agent in &state.agents {
            *agent_statistics.entry(agent.status.to_string()).or_insert(0) += 1;
        }
        let mut task_statistics = BTreeMap::new();
        for task in &state.tasks {
            *task_statistics.entry(task.status.to_string()).or_insert(0) += 1;
        }

        Ok(OrchestratorStatus {
            agent_statistics,
            task_statistics,
            recent_activity: state.tasks.iter().rev().take(5).cloned().collect(),
            system_health: Some("operational".to_string()),
        })
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ConsoleError> {
        request.validate()?;
        let mut state = self.state.write().await;
        Ok(state.insert_task(request.title, request.description, request.task_type, request.priority))
    }

    async fn execute_task(&self, task_id: i64) -> Result<(), ConsoleError> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ConsoleError::status(Operation::ExecuteTask, 404, format!("Task {} not found", task_id)))?;

        if !task.status.is_executable() {
            return Err(ConsoleError::status(Operation::ExecuteTask, 400, "Task is not in pending status"));
        }

        let timestamp = now();
        task.status = TaskStatus::Completed;
        task.result = Some(simulated_result(&task.task_type));
        task.completed_at = Some(timestamp.clone());
        task.updated_at = Some(timestamp);
        let agent_id = task.agent_id;
        state.release_agent(agent_id);
        Ok(())
    }

    async fn analyze_request(&self, request: &str) -> Result<AnalysisResult, ConsoleError> {
        if request.trim().is_empty() {
            return Err(ConsoleError::validation("analysis request text is required"));
        }
        Ok(self.analyze(request))
    }

    async fn execute_plan(&self, tasks: &[SuggestedTask]) -> Result<(), ConsoleError> {
        let mut state = self.state.write().await;
        for suggested in tasks {
            state.insert_task(
                suggested.title.clone(),
                suggested.description.clone(),
                suggested.task_type.clone(),
                suggested.priority.unwrap_or(1),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_task_assigns_idle_agent() {
        let orchestrator = InMemoryOrchestrator::with_default_roster();

        let request = CreateTaskRequest::new("Logo", "", TaskType::Visual, DEFAULT_TASK_PRIORITY).unwrap();
        let task = orchestrator.create_task(request).await.unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        let agents = orchestrator.list_agents().await.unwrap();
        let assigned = agents.iter().find(|a| Some(a.id) == task.agent_id).unwrap();
        assert_eq!(assigned.agent_type, TaskType::Visual);
        assert_eq!(assigned.status, AgentStatus::Busy);
    }

    #[tokio::test]
    async fn test_execute_completes_pending_task_once() {
        let orchestrator = InMemoryOrchestrator::with_default_roster();
        let request = CreateTaskRequest::new("Copy", "", TaskType::Text, DEFAULT_TASK_PRIORITY).unwrap();
        let task = orchestrator.create_task(request).await.unwrap();

        orchestrator.execute_task(task.id).await.unwrap();

        let tasks = orchestrator.list_tasks().await.unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Completed);
        assert!(tasks[0].result.is_some());
        let agents = orchestrator.list_agents().await.unwrap();
        assert!(agents.iter().all(|a| a.status == AgentStatus::Idle));

        let again = orchestrator.execute_task(task.id).await.unwrap_err();
        assert!(matches!(again, ConsoleError::Remote { cause: crate::error::RemoteCause::Status { code: 400, .. }, .. }));
    }

    #[tokio::test]
    async fn test_execute_unknown_task_is_not_found() {
        let orchestrator = InMemoryOrchestrator::new();

        let error = orchestrator.execute_task(42).await.unwrap_err();

        assert!(matches!(error, ConsoleError::Remote { cause: crate::error::RemoteCause::Status { code: 404, .. }, .. }));
    }

    #[tokio::test]
    async fn test_analysis_matches_keywords() {
        let orchestrator = InMemoryOrchestrator::new();

        let result = orchestrator
            .analyze_request("Jeg trenger en kampanje med tekst, bilde og n8n workflow")
            .await
            .unwrap();

        let types: Vec<_> = result.suggested_tasks.iter().map(|t| t.task_type.clone()).collect();
        assert_eq!(types, vec![TaskType::Text, TaskType::Visual, TaskType::Workflow]);
        assert_eq!(result.coordination_strategy, COORDINATION_STRATEGY);
    }

    #[tokio::test]
    async fn test_automatisering_suggests_code_work() {
        let orchestrator = InMemoryOrchestrator::new();

        let result = orchestrator.analyze_request("Vi trenger automatisering av fakturaer").await.unwrap();

        // "automatiser" is a prefix of "automatisering", so workflow matches too
        let types: Vec<_> = result.suggested_tasks.iter().map(|t| t.task_type.clone()).collect();
        assert_eq!(types, vec![TaskType::Code, TaskType::Workflow]);
    }

    #[tokio::test]
    async fn test_norwegian_locale_uses_norwegian_titles() {
        let orchestrator = InMemoryOrchestrator::new().with_locale(Locale::Norwegian);

        let result = orchestrator.analyze_request("Lag en logo og en artikkel").await.unwrap();
        let titles: Vec<_> = result.suggested_tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Generer tekstinnhold", "Lag visuelt innhold"]);

        let fallback = orchestrator.analyze_request("hmm").await.unwrap();
        assert_eq!(fallback.suggested_tasks[0].title, "Analyser forespørsel");

        let english = InMemoryOrchestrator::new().analyze_request("hmm").await.unwrap();
        assert_eq!(english.suggested_tasks[0].title, "Analyse request");
    }

    #[tokio::test]
    async fn test_analysis_falls_back_to_general_task() {
        let orchestrator = InMemoryOrchestrator::new();

        let result = orchestrator.analyze_request("hmm").await.unwrap();

        assert_eq!(result.suggested_tasks.len(), 1);
        assert_eq!(result.suggested_tasks[0].task_type, TaskType::Text);
    }

    #[tokio::test]
    async fn test_execute_plan_creates_pending_tasks() {
        let orchestrator = InMemoryOrchestrator::with_default_roster();
        let plan = orchestrator.analyze_request("sales outreach and support").await.unwrap();

        orchestrator.execute_plan(&plan.suggested_tasks).await.unwrap();

        let tasks = orchestrator.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), plan.suggested_tasks.len());
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));

        let status = orchestrator.orchestrator_status().await.unwrap();
        assert_eq!(status.task_statistics["pending"], tasks.len() as u64);
        assert_eq!(status.agent_statistics["busy"], 2);
    }
}
