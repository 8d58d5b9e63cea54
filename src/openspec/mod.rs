mod change;
mod cli;
#[cfg(test)]
mod mock;
mod status;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

pub use change::{count_active_changes, create_change};
pub use cli::OpenSpecCli;
#[cfg(test)]
pub use mock::FakeSpecTool;
#[cfg(test)]
pub use status::ChangePhase;
pub use status::{change_summary, parse_status, ChangeStatus};

/// The external change-tracking tool run inside each worktree.
#[async_trait]
pub trait SpecTool: Send + Sync {
    async fn ensure_installed(&self) -> Result<()>;

    async fn init(&self, dir: &Path) -> Result<()>;

    /// Changes known to the tool in `dir`. A tool that cannot report status
    /// yields an empty list.
    async fn status(&self, dir: &Path) -> Result<Vec<ChangeStatus>>;
}
