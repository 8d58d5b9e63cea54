use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::commands::common::App;
use crate::config::WorkerConfig;
use crate::instructions::write_worktree_gitignore;
use crate::skills::copy_dir;
use crate::team::{branch_name, next_worker_id, TeamError};

#[derive(ClapArgs)]
pub struct Args {
    /// Role to instantiate (a directory under agents/teams/)
    pub role: String,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(&app, &args.role).await.map(|_| ())
}

/// Make sure `agents/teams/<role>` exists, importing it from the global
/// skills directory when only a global copy is present.
fn ensure_role_dir(app: &App, role: &str) -> Result<()> {
    let role_dir = app.layout.role_dir(role);
    if role_dir.exists() {
        return Ok(());
    }

    match app.skills.global_skill_dir(role).filter(|p| p.exists()) {
        Some(global) => {
            println!("Role '{}' found in global skills at {}", role, global.display());
            println!("Copying to {}...", role_dir.display());
            copy_dir(&global, &role_dir).context("copy global skill")
        }
        None => Err(TeamError::RoleDefinitionNotFound(role.to_string()).into()),
    }
}

/// Returns the new worker id.
pub async fn run(app: &App, role: &str) -> Result<String> {
    ensure_role_dir(app, role)?;

    let layout = &app.layout;
    let worker_id = next_worker_id(layout, role);
    let worktree = layout.worktree_path(&worker_id);
    let branch = branch_name(&worker_id);

    if worktree.exists() {
        return Err(TeamError::WorkerExists {
            id: worker_id,
            path: worktree.display().to_string(),
        }
        .into());
    }

    println!("Creating worker '{}' (role: {})...", worker_id, role);
    app.git.worktree_add(&worktree, &branch).await?;

    write_worktree_gitignore(&worktree).context("write .gitignore")?;

    WorkerConfig::new(&worker_id, role, &app.settings.default_provider)
        .save(&layout.worker_config_path(&worker_id))
        .context("save worker config")?;

    app.spec
        .ensure_installed()
        .await
        .context("install openspec")?;
    app.spec
        .init(&worktree)
        .await
        .context("openspec setup")?;

    println!("✓ Created worker '{}' at {}", worker_id, worktree.display());
    println!("  → Role: {}", role);
    println!("  → Branch: {}", branch);
    println!("  → Open with: agent-team worker open {}", worker_id);
    Ok(worker_id)
}
