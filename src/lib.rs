pub mod analysis;
pub mod api;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod session;
pub mod store;
mod test_helpers;

pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use session::ConsoleSession;

#[cfg(feature = "tauri-app")]
mod tauri_app {
    use crate::analysis::WorkflowView;
    use crate::api::{AnalysisResult, OrchestratorStatus};
    use crate::catalog::{task_type_options, TaskType, TaskTypeOption};
    use crate::config::ConsoleConfig;
    use crate::dashboard::{AgentCard, DashboardSummary, StatusOverview, TaskRow};
    use crate::lifecycle::{SubmitOutcome, TaskDraft};
    use crate::session::ConsoleSession;
    use std::sync::Arc;
    use tauri::{Manager, State};

    struct AppState {
        session: Arc<ConsoleSession>,
    }

    #[tauri::command]
    async fn get_agents(state: State<'_, AppState>) -> Result<Vec<AgentCard>, String> {
        Ok(state.session.agent_cards().await)
    }

    #[tauri::command]
    async fn get_tasks(state: State<'_, AppState>) -> Result<Vec<TaskRow>, String> {
        Ok(state.session.task_rows().await)
    }

    #[tauri::command]
    async fn get_orchestrator_status(state: State<'_, AppState>) -> Result<Option<StatusOverview>, String> {
        Ok(state.session.status_overview().await)
    }

    #[tauri::command]
    async fn get_raw_status(state: State<'_, AppState>) -> Result<Option<OrchestratorStatus>, String> {
        Ok(state.session.store().status().await)
    }

    #[tauri::command]
    async fn get_dashboard(state: State<'_, AppState>) -> Result<DashboardSummary, String> {
        Ok(state.session.dashboard().await)
    }

    #[tauri::command]
    async fn get_last_refresh_error(state: State<'_, AppState>) -> Result<Option<String>, String> {
        Ok(state.session.store().last_failure().await.map(|f| f.message))
    }

    #[tauri::command]
    async fn refresh_all(state: State<'_, AppState>) -> Result<DashboardSummary, String> {
        state.session.store().refresh_all().await;
        Ok(state.session.dashboard().await)
    }

    #[tauri::command]
    async fn get_task_types(state: State<'_, AppState>) -> Result<Vec<TaskTypeOption>, String> {
        Ok(task_type_options(state.session.config().locale))
    }

    #[tauri::command]
    async fn get_task_draft(state: State<'_, AppState>) -> Result<TaskDraft, String> {
        Ok(state.session.tasks().draft().await)
    }

    #[tauri::command]
    async fn update_task_draft(
        title: String,
        description: String,
        task_type: Option<String>,
        state: State<'_, AppState>,
    ) -> Result<(), String> {
        let draft = TaskDraft::new(title, description, task_type.map(TaskType::from));
        state.session.tasks().set_draft(draft).await;
        Ok(())
    }

    #[tauri::command]
    async fn submit_new_task(state: State<'_, AppState>) -> Result<SubmitOutcome, String> {
        state.session.tasks().submit_new_task().await.map_err(|e| e.to_string())
    }

    #[tauri::command]
    async fn run_task(task_id: i64, state: State<'_, AppState>) -> Result<(), String> {
        state.session.tasks().run_task(task_id).await.map_err(|e| e.to_string())
    }

    #[tauri::command]
    async fn set_analysis_request(text: String, state: State<'_, AppState>) -> Result<(), String> {
        state.session.analysis().set_request_text(text).await;
        Ok(())
    }

    #[tauri::command]
    async fn submit_analysis(state: State<'_, AppState>) -> Result<Option<AnalysisResult>, String> {
        state.session.analysis().submit_analysis().await.map_err(|e| e.to_string())
    }

    #[tauri::command]
    async fn get_analysis_state(state: State<'_, AppState>) -> Result<WorkflowView, String> {
        Ok(state.session.analysis().view().await)
    }

    #[tauri::command]
    async fn accept_plan(state: State<'_, AppState>) -> Result<(), String> {
        state.session.analysis().accept_plan().await.map_err(|e| e.to_string())
    }

    pub fn run() {
        let config = ConsoleConfig::load().unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {:#}", e);
            ConsoleConfig::default()
        });
        crate::logging::init(&config.log_level);

        let session = Arc::new(ConsoleSession::new(config));
        let app_state = AppState {
            session: session.clone(),
        };

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .invoke_handler(tauri::generate_handler![
                get_agents,
                get_tasks,
                get_orchestrator_status,
                get_raw_status,
                get_dashboard,
                get_last_refresh_error,
                refresh_all,
                get_task_types,
                get_task_draft,
                update_task_draft,
                submit_new_task,
                run_task,
                set_analysis_request,
                submit_analysis,
                get_analysis_state,
                accept_plan,
            ])
            .setup(move |app| {
                app.manage(app_state);

                // Initial sync; the webview re-reads once commands return
                let startup_session = session.clone();
                tauri::async_runtime::spawn(async move {
                    startup_session.start().await;
                });

                if let Some(window) = app.get_webview_window("main") {
                    let handle = app.handle().clone();
                    window.on_window_event(move |event| {
                        if let tauri::WindowEvent::CloseRequested { .. } = event {
                            let state: State<AppState> = handle.state();
                            let session = state.session.clone();
                            tauri::async_runtime::block_on(async move {
                                session.shutdown().await;
                            });
                        }
                    });
                }

                Ok(())
            })
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}

#[cfg(feature = "tauri-app")]
pub use tauri_app::run;
