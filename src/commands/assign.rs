use anyhow::Result;
use clap::Args as ClapArgs;

use crate::commands::common::{self, App};
use crate::commands::open;
use crate::config::RoleConfig;
use crate::team::TeamError;

#[derive(ClapArgs)]
pub struct Args {
    /// Role name
    pub name: String,

    /// Short description of the change
    pub description: String,

    /// AI provider used if the session has to be opened
    pub provider: Option<String>,

    /// AI model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// Path to proposal file (use - for stdin)
    #[arg(short, long)]
    pub proposal: Option<String>,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(
        &app,
        &args.name,
        &args.description,
        args.provider.as_deref(),
        args.model.as_deref().unwrap_or(""),
        args.proposal.as_deref(),
    )
    .await
}

/// `proposal` is a file path or `-` for stdin, read once the role is known.
pub async fn run(
    app: &App,
    name: &str,
    desc: &str,
    provider: Option<&str>,
    model: &str,
    proposal: Option<&str>,
) -> Result<()> {
    let layout = &app.layout;
    if !layout.legacy_teams_dir(name).exists() {
        return Err(TeamError::RoleNotFound(name.to_string()).into());
    }

    let proposal = common::read_input(proposal, "proposal")?;
    let change = common::create_change_for(&layout.worktree_path(name), desc, &proposal, "")?;

    let config_path = layout.legacy_config_path(name);
    let mut config = RoleConfig::load(&config_path)?;

    if !app.session.pane_alive(&config.pane_id).await {
        println!("Role '{}' is not running, opening session first...", name);
        open::run(app, name, provider, model).await?;
        config = RoleConfig::load(&config_path)?;
        common::wait_for_ai(app).await;
    }

    common::notify_change(app, &config.pane_id, desc, &change).await?;

    println!("✓ Assigned to '{}': {}", name, desc);
    Ok(())
}
