use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::commands::common::{self, App};
use crate::config::{PaneBinding, RoleConfig};
use crate::instructions::inject_role_prompt;
use crate::team::{list_legacy_roles, TeamError};

#[derive(ClapArgs)]
pub struct Args {
    /// Role name
    pub name: String,

    /// AI provider (claude, codex, opencode)
    pub provider: Option<String>,

    /// AI model identifier
    #[arg(short, long)]
    pub model: Option<String>,
}

#[derive(ClapArgs)]
pub struct AllArgs {
    /// AI provider (claude, codex, opencode)
    pub provider: Option<String>,

    /// AI model identifier
    #[arg(short, long)]
    pub model: Option<String>,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(
        &app,
        &args.name,
        args.provider.as_deref(),
        args.model.as_deref().unwrap_or(""),
    )
    .await
}

pub async fn execute_all(args: AllArgs) -> Result<()> {
    let app = App::from_cwd().await?;
    run_all(
        &app,
        args.provider.as_deref(),
        args.model.as_deref().unwrap_or(""),
    )
    .await
}

pub async fn run(app: &App, name: &str, provider: Option<&str>, model: &str) -> Result<()> {
    let layout = &app.layout;
    if !layout.legacy_teams_dir(name).exists() {
        return Err(TeamError::RoleNotFound(name.to_string()).into());
    }

    let config_path = layout.legacy_config_path(name);
    let mut config = RoleConfig::load(&config_path)?;
    let provider = app.resolve_provider(provider, config.default_provider());
    let model = common::resolve_model(model, &config);

    if app.session.pane_alive(&config.pane_id).await {
        println!(
            "Role '{}' is already running (pane {})",
            name, config.pane_id
        );
        return Ok(());
    }

    let worktree = layout.worktree_path(name);
    inject_role_prompt(layout, &worktree, name, name).context("generate CLAUDE.md")?;

    let pane_id = common::spawn_session(app, &mut config, &worktree, name, false).await?;
    config.save(&config_path)?;

    common::launch_ai(app, &pane_id, &provider, &model).await?;

    println!("✓ Opened role '{}' ({}) [pane {}]", name, provider, pane_id);
    Ok(())
}

pub async fn run_all(app: &App, provider: Option<&str>, model: &str) -> Result<()> {
    let roles = list_legacy_roles(&app.layout);
    if roles.is_empty() {
        return Err(TeamError::NoRoles.into());
    }

    for role in &roles {
        if let Err(e) = run(app, role, provider, model).await {
            eprintln!("Warning: failed to open '{}': {:#}", role, e);
        }
    }
    Ok(())
}
