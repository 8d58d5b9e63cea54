use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::commands::common::App;
use crate::config::{PaneBinding, RoleConfig, WorkerConfig};
use crate::team::TeamError;

#[derive(ClapArgs)]
pub struct Args {
    /// Worker id (or legacy role name)
    pub id: String,

    /// Answer to deliver
    pub answer: String,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(&app, &args.id, &args.answer).await
}

pub fn reply_text(answer: &str) -> String {
    format!("[Main Controller Reply] {}", answer)
}

/// Pane bound to `id`: a worker config first, then a legacy role config.
fn target_pane(app: &App, id: &str) -> Result<String> {
    let worker_path = app.layout.worker_config_path(id);
    if worker_path.is_file() {
        let config = WorkerConfig::load(&worker_path)
            .with_context(|| format!("worker '{}' not found", id))?;
        return Ok(config.pane_id().to_string());
    }

    let role_path = app.layout.legacy_config_path(id);
    if role_path.is_file() {
        let config = RoleConfig::load(&role_path)?;
        return Ok(config.pane_id().to_string());
    }

    Err(TeamError::WorkerNotFound(id.to_string()).into())
}

pub async fn run(app: &App, id: &str, answer: &str) -> Result<()> {
    let pane_id = target_pane(app, id)?;

    if !app.session.pane_alive(&pane_id).await {
        return Err(TeamError::NotRunning(id.to_string()).into());
    }

    app.session
        .pane_send(&pane_id, &reply_text(answer))
        .await
        .context("send reply")?;

    println!("✓ Replied to '{}'", id);
    Ok(())
}
