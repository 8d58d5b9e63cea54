use anyhow::Result;
use clap::Args as ClapArgs;

use crate::commands::common::App;
use crate::team::{branch_name, TeamError};

#[derive(ClapArgs)]
pub struct Args {
    /// Role name
    pub name: String,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(&app, &args.name).await
}

pub fn merge_message(name: &str) -> String {
    format!("merge: integrate work from team role '{}'", name)
}

pub async fn run(app: &App, name: &str) -> Result<()> {
    if !app.layout.worktree_path(name).exists() {
        return Err(TeamError::RoleNotFound(name.to_string()).into());
    }

    let branch = branch_name(name);
    let target = app.git.current_branch().await;

    println!("Merging branch '{}' into '{}'...", branch, target);
    app.git.merge(&branch, &merge_message(name)).await?;

    println!("✓ Merged '{}' into {}", name, target);
    println!(
        "  → Run 'agent-team delete {}' to remove the worktree when done",
        name
    );
    Ok(())
}
