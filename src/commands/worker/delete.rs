use anyhow::Result;
use clap::Args as ClapArgs;

use crate::commands::common::{self, App};
use crate::config::WorkerConfig;
use crate::team::{branch_name, TeamError};

#[derive(ClapArgs)]
pub struct Args {
    /// Worker id (e.g. backend-001)
    pub worker_id: String,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(&app, &args.worker_id).await
}

pub async fn run(app: &App, worker_id: &str) -> Result<()> {
    let layout = &app.layout;
    let worktree = layout.worktree_path(worker_id);
    if !worktree.exists() {
        return Err(TeamError::WorkerNotFound(worker_id.to_string()).into());
    }

    println!("Deleting worker '{}'...", worker_id);

    if let Ok(config) = WorkerConfig::load(&layout.worker_config_path(worker_id)) {
        common::close_pane(app, &config.pane_id).await;
    }

    common::remove_worktree(app, &worktree).await;
    app.git.delete_branch(&branch_name(worker_id)).await;

    let worker_dir = layout.worker_dir(worker_id);
    if worker_dir.exists() {
        if let Err(e) = std::fs::remove_dir_all(&worker_dir) {
            eprintln!("Warning: failed to remove {}: {}", worker_dir.display(), e);
        }
    }

    println!("✓ Deleted worker '{}'", worker_id);
    Ok(())
}
