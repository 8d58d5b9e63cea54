use clap::{Parser, Subcommand};

use crate::commands::worker;
use crate::commands::{assign, create, delete, merge, open, reply, reply_main};

#[derive(Parser)]
#[command(name = "agent-team")]
#[command(about = "AI team role manager - git worktrees plus terminal multiplexer panes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new role with git worktree
    Create(create::Args),

    /// Open a role session in a new terminal tab
    Open(open::Args),

    /// Open all role sessions
    OpenAll(open::AllArgs),

    /// Create an OpenSpec change and notify the role session
    Assign(assign::Args),

    /// Show all roles, running state, and OpenSpec change status
    Status,

    /// Remove a role and its worktree
    Delete(delete::Args),

    /// Merge a role's branch into the current branch
    Merge(merge::Args),

    /// Send a reply to a worker's running session
    Reply(reply::Args),

    /// Send a message to the main controller's session (used by workers)
    ReplyMain(reply_main::Args),

    /// Manage workers (role instances in isolated worktrees)
    #[command(subcommand)]
    Worker(WorkerCommands),

    /// Manage roles (skill package definitions)
    #[command(subcommand)]
    Role(RoleCommands),
}

#[derive(Subcommand)]
pub enum WorkerCommands {
    /// Create a new worker for a role
    Create(worker::create::Args),

    /// Open a worker session in a new terminal tab or window
    Open(worker::open::Args),

    /// Create an OpenSpec change and notify the worker session
    Assign(worker::assign::Args),

    /// Show all workers, their roles, running state, and active changes
    Status,

    /// Merge a worker's branch into the current branch
    Merge(worker::merge::Args),

    /// Remove a worker and its worktree
    Delete(worker::delete::Args),
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// List available roles in agents/teams/
    List,
}
