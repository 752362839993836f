pub mod types;

pub use types::*;

use crate::api::{Agent, OrchestratorStatus, Task};
use crate::catalog::{AgentStatus, Locale, TaskStatus};
use crate::store::Snapshot;
use std::collections::BTreeMap;

const NOT_AVAILABLE: &str = "N/A";

fn count_tasks(tasks: &[Task], status: &TaskStatus) -> usize {
    tasks.iter().filter(|t| &t.status == status).count()
}

pub fn summarize(snapshot: &Snapshot, locale: Locale, recent_limit: usize) -> DashboardSummary {
    DashboardSummary {
        total_agents: snapshot.agents.len(),
        available_agents: snapshot
            .agents
            .iter()
            .filter(|a| a.status == AgentStatus::Idle)
            .count(),
        active_tasks: count_tasks(&snapshot.tasks, &TaskStatus::InProgress),
        pending_tasks: count_tasks(&snapshot.tasks, &TaskStatus::Pending),
        completed_tasks: count_tasks(&snapshot.tasks, &TaskStatus::Completed),
        failed_tasks: count_tasks(&snapshot.tasks, &TaskStatus::Failed),
        recent_activity: snapshot
            .tasks
            .iter()
            .take(recent_limit)
            .map(|t| task_row(t, locale))
            .collect(),
    }
}

pub fn task_row(task: &Task, locale: Locale) -> TaskRow {
    TaskRow {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone().unwrap_or_default(),
        type_label: task.task_type.label(locale).to_string(),
        priority: task.priority,
        status: task.status.to_string(),
        can_execute: task.status.is_executable(),
        error_message: task.error_message.clone(),
    }
}

pub fn agent_card(agent: &Agent, locale: Locale) -> AgentCard {
    let languages = if agent.capabilities.languages.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        agent.capabilities.languages.join(", ")
    };

    AgentCard {
        id: agent.id,
        name: agent.name.clone(),
        category_label: agent.agent_type.label(locale).to_string(),
        description: agent.description.clone().unwrap_or_default(),
        status: agent.status.to_string(),
        languages,
        availability: agent
            .capabilities
            .availability
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

fn statistic_rows(stats: &BTreeMap<String, u64>) -> Vec<StatisticRow> {
    stats
        .iter()
        .map(|(status, count)| StatisticRow {
            status: status.clone(),
            count: *count,
        })
        .collect()
}

pub fn status_overview(status: &OrchestratorStatus) -> StatusOverview {
    StatusOverview {
        agent_statistics: statistic_rows(&status.agent_statistics),
        task_statistics: statistic_rows(&status.task_statistics),
        system_health: status.system_health.clone(),
    }
}
