mod backend;
#[cfg(test)]
mod mock;
mod tmux;
mod wezterm;
mod worktree;

use std::path::Path;

pub use backend::{BackendKind, SessionBackend};
#[cfg(test)]
pub use mock::MockBackend;
pub use tmux::TmuxBackend;
pub use wezterm::WeztermBackend;
pub use worktree::{resolve_main_root, resolve_toplevel, GitClient};

fn path_to_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
