use anyhow::{anyhow, Context, Result};
use clap::Args as ClapArgs;
use std::path::Path;

use crate::commands::common::load_settings;
use crate::config::{RoleConfig, WorkerConfig};
use crate::session::{resolve_main_root, resolve_toplevel, SessionBackend};
use crate::team::{TeamError, TeamLayout};

#[derive(ClapArgs)]
pub struct Args {
    /// Message for the main controller
    pub message: String,
}

/// Who is speaking and where the controller pane is.
#[derive(Debug, PartialEq, Eq)]
pub struct Sender {
    pub label: String,
    pub controller_pane_id: String,
}

pub async fn execute(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().context("get working directory")?;
    let worktree = resolve_toplevel(&cwd)
        .await
        .map_err(|_| anyhow!("not in a git repository"))?;
    let main_root = resolve_main_root(&cwd).await?;

    let settings = load_settings()?;
    let session = settings
        .backend
        .create(settings.timeouts.send_enter_delay());

    let sender = find_sender(&main_root, &worktree, &cwd)?;
    run(session.as_ref(), &sender, &args.message).await
}

/// A worker is identified by its worktree directory name; sessions from the
/// older role layout carry their config inside the worktree.
pub fn find_sender(main_root: &Path, worktree: &Path, cwd: &Path) -> Result<Sender> {
    let worker_id = worktree
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let layout = TeamLayout::new(main_root.to_path_buf(), "");
    let worker_path = layout.worker_config_path(&worker_id);
    if !worker_id.is_empty() && worker_path.is_file() {
        let config = WorkerConfig::load(&worker_path)?;
        return Ok(Sender {
            label: format!("Worker: {}", worker_id),
            controller_pane_id: config.controller_pane_id,
        });
    }

    find_legacy_sender(cwd)
}

fn find_legacy_sender(dir: &Path) -> Result<Sender> {
    let teams_dir = dir.join("agents").join("teams");
    let entries = std::fs::read_dir(&teams_dir)
        .map_err(|_| TeamError::NotInWorktree(dir.display().to_string()))?;

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();

    names
        .into_iter()
        .find_map(|name| {
            let config = RoleConfig::load(&teams_dir.join(&name).join("config.yaml")).ok()?;
            Some(Sender {
                label: format!("Role: {}", name),
                controller_pane_id: config.controller_pane_id,
            })
        })
        .ok_or_else(|| TeamError::NotInWorktree(dir.display().to_string()).into())
}

pub async fn run(session: &dyn SessionBackend, sender: &Sender, message: &str) -> Result<()> {
    if sender.controller_pane_id.is_empty() {
        return Err(TeamError::NoControllerPane(sender.label.clone()).into());
    }

    if !session.pane_alive(&sender.controller_pane_id).await {
        return Err(TeamError::ControllerOffline(sender.controller_pane_id.clone()).into());
    }

    session
        .pane_send(
            &sender.controller_pane_id,
            &format!("[{}] {}", sender.label, message),
        )
        .await
        .context("send to main controller")?;

    println!("✓ Sent to main controller from '{}'", sender.label);
    Ok(())
}
