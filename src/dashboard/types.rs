use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_agents: usize,
    pub available_agents: usize,
    pub active_tasks: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub recent_activity: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub type_label: String,
    pub priority: i64,
    pub status: String,
    pub can_execute: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentCard {
    pub id: i64,
    pub name: String,
    pub category_label: String,
    pub description: String,
    pub status: String,
    pub languages: String,
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticRow {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusOverview {
    pub agent_statistics: Vec<StatisticRow>,
    pub task_statistics: Vec<StatisticRow>,
    pub system_health: Option<String>,
}
