use anyhow::Result;
use clap::Args as ClapArgs;

use crate::commands::common::{self, App};
use crate::commands::worker::open;
use crate::config::WorkerConfig;

#[derive(ClapArgs)]
pub struct Args {
    /// Worker id (e.g. backend-001)
    pub worker_id: String,

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

    /// Path to design file (brainstorming output)
    #[arg(short, long)]
    pub design: Option<String>,

    /// Open in a new window instead of a tab
    #[arg(short = 'w', long)]
    pub new_window: bool,
}

/// `proposal` and `design` are file paths (`-` for stdin), read only after
/// the worker has been found.
pub struct Assignment<'a> {
    pub description: &'a str,
    pub proposal: Option<&'a str>,
    pub design: Option<&'a str>,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    let assignment = Assignment {
        description: &args.description,
        proposal: args.proposal.as_deref(),
        design: args.design.as_deref(),
    };
    run(
        &app,
        &args.worker_id,
        &assignment,
        args.provider.as_deref(),
        args.model.as_deref().unwrap_or(""),
        args.new_window,
    )
    .await
}

pub async fn run(
    app: &App,
    worker_id: &str,
    assignment: &Assignment<'_>,
    provider: Option<&str>,
    model: &str,
    new_window: bool,
) -> Result<()> {
    let mut config = open::load_worker(app, worker_id)?;

    let proposal = common::read_input(assignment.proposal, "proposal")?;
    let design = common::read_input(assignment.design, "design")?;
    let change = common::create_change_for(
        &app.layout.worktree_path(worker_id),
        assignment.description,
        &proposal,
        &design,
    )?;

    if !app.session.pane_alive(&config.pane_id).await {
        println!(
            "Worker '{}' is not running, opening session first...",
            worker_id
        );
        open::run(app, worker_id, provider, model, new_window).await?;
        config = WorkerConfig::load(&app.layout.worker_config_path(worker_id))?;
        common::wait_for_ai(app).await;
    }

    common::notify_change(app, &config.pane_id, assignment.description, &change).await?;

    println!(
        "✓ Assigned to worker '{}': {}",
        worker_id, assignment.description
    );
    Ok(())
}
