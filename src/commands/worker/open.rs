use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::commands::common::{self, App};
use crate::config::{PaneBinding, WorkerConfig};
use crate::instructions::inject_role_prompt;
use crate::team::TeamError;

#[derive(ClapArgs)]
pub struct Args {
    /// Worker id (e.g. backend-001)
    pub worker_id: String,

    /// AI provider (claude, codex, opencode)
    pub provider: Option<String>,

    /// AI model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// Open in a new window instead of a tab
    #[arg(short = 'w', long)]
    pub new_window: bool,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(
        &app,
        &args.worker_id,
        args.provider.as_deref(),
        args.model.as_deref().unwrap_or(""),
        args.new_window,
    )
    .await
}

/// Load the config of an existing worker whose worktree is still present.
pub fn load_worker(app: &App, worker_id: &str) -> Result<WorkerConfig> {
    let config_path = app.layout.worker_config_path(worker_id);
    if !config_path.is_file() {
        return Err(TeamError::WorkerNotFound(worker_id.to_string()).into());
    }
    let config = WorkerConfig::load(&config_path)?;

    let worktree = app.layout.worktree_path(worker_id);
    if !worktree.exists() {
        return Err(TeamError::WorktreeMissing {
            id: worker_id.to_string(),
            path: worktree.display().to_string(),
        }
        .into());
    }
    Ok(config)
}

fn copy_skills(app: &App, worktree: &std::path::Path, role: &str) {
    println!("  Copying skills for role '{}'...", role);
    match app.skills.copy_to_worktree(worktree, role) {
        Ok(report) => {
            for skill in report.missing {
                eprintln!("Warning: skill '{}' not found, skipping", skill);
            }
        }
        Err(e) => eprintln!("Warning: failed to copy skills: {:#}", e),
    }
}

pub async fn run(
    app: &App,
    worker_id: &str,
    provider: Option<&str>,
    model: &str,
    new_window: bool,
) -> Result<()> {
    let mut config = load_worker(app, worker_id)?;
    let provider = app.resolve_provider(provider, config.default_provider());
    let model = common::resolve_model(model, &config);

    if app.session.pane_alive(&config.pane_id).await {
        println!(
            "Worker '{}' is already running (pane {})",
            worker_id, config.pane_id
        );
        return Ok(());
    }

    let worktree = app.layout.worktree_path(worker_id);
    copy_skills(app, &worktree, &config.role);

    inject_role_prompt(&app.layout, &worktree, worker_id, &config.role)
        .context("inject role prompt")?;

    let pane_id =
        common::spawn_session(app, &mut config, &worktree, worker_id, new_window).await?;
    config.save(&app.layout.worker_config_path(worker_id))?;

    common::launch_ai(app, &pane_id, &provider, &model).await?;

    println!(
        "✓ Opened worker '{}' (role: {}, provider: {}) [pane {}]",
        worker_id, config.role, provider, pane_id
    );
    Ok(())
}
