use anyhow::Result;
use clap::Args as ClapArgs;

use crate::commands::common::App;
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

pub fn merge_message(worker_id: &str) -> String {
    format!("merge: integrate work from worker '{}'", worker_id)
}

pub async fn run(app: &App, worker_id: &str) -> Result<()> {
    if !app.layout.worktree_path(worker_id).exists() {
        return Err(TeamError::WorkerNotFound(worker_id.to_string()).into());
    }

    let branch = branch_name(worker_id);
    let target = app.git.current_branch().await;

    println!("Merging branch '{}' into '{}'...", branch, target);
    app.git.merge(&branch, &merge_message(worker_id)).await?;

    println!("✓ Merged '{}' into {}", worker_id, target);
    println!(
        "  → Run 'agent-team worker delete {}' to remove the worktree when done",
        worker_id
    );
    Ok(())
}
