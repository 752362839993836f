// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(all(not(debug_assertions), feature = "tauri-app"), windows_subsystem = "windows")]

#[cfg(feature = "tauri-app")]
fn main() {
    agent_console_lib::run();
}

/// Headless mode: one sync against the service, then the dashboard as JSON.
#[cfg(not(feature = "tauri-app"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use agent_console_lib::{ConsoleConfig, ConsoleSession};
    use anyhow::Context;

    let config = ConsoleConfig::load().context("failed to load console config")?;
    agent_console_lib::logging::init(&config.log_level);

    let session = ConsoleSession::new(config);
    session.start().await;

    if let Some(failure) = session.store().last_failure().await {
        tracing::warn!(collection = ?failure.collection, "Dashboard may be incomplete: {}", failure.message);
    }

    let summary = session.dashboard().await;
    let rendered = serde_json::to_string_pretty(&summary).context("failed to render dashboard")?;
    println!("{}", rendered);

    session.shutdown().await;
    Ok(())
}
