use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::commands::common::App;
use crate::config::RoleConfig;
use crate::instructions::default_prompt_md;
use crate::team::{branch_name, TeamError};

#[derive(ClapArgs)]
pub struct Args {
    /// Role name (also the worktree and branch suffix)
    pub name: String,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(&app, &args.name).await
}

pub async fn run(app: &App, name: &str) -> Result<()> {
    let layout = &app.layout;
    let worktree = layout.worktree_path(name);
    let branch = branch_name(name);

    if worktree.exists() {
        return Err(TeamError::RoleExists {
            name: name.to_string(),
            path: worktree.display().to_string(),
        }
        .into());
    }

    println!("Creating role '{}'...", name);
    app.git.worktree_add(&worktree, &branch).await?;

    let teams_dir = layout.legacy_teams_dir(name);
    for sub in ["tasks/pending", "tasks/done"] {
        let dir = teams_dir.join(sub);
        std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    }

    RoleConfig::new(name, &app.settings.default_provider).save(&layout.legacy_config_path(name))?;

    let prompt_path = teams_dir.join("prompt.md");
    std::fs::write(&prompt_path, default_prompt_md(name))
        .with_context(|| format!("write {}", prompt_path.display()))?;

    println!("✓ Created role '{}' at {}", name, worktree.display());
    println!("  → Edit {} to define the role", prompt_path.display());
    println!(
        "  → Edit {} to set default_provider",
        layout.legacy_config_path(name).display()
    );
    Ok(())
}
