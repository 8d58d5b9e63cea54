use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::timestamp_now;

pub fn changes_dir(worktree: &Path) -> PathBuf {
    worktree.join("openspec").join("changes")
}

/// Create `openspec/changes/<name>/` with its metadata and proposal.
/// `design.md` is only written when `design` is non-empty.
pub fn create_change(worktree: &Path, name: &str, proposal: &str, design: &str) -> Result<PathBuf> {
    let change_path = changes_dir(worktree).join(name);
    std::fs::create_dir_all(&change_path).context("create change directory")?;

    let meta = format!("schema: default\ncreated_at: {}\n", timestamp_now());
    std::fs::write(change_path.join(".openspec.yaml"), meta).context("write .openspec.yaml")?;
    std::fs::write(change_path.join("proposal.md"), proposal).context("write proposal.md")?;

    if !design.is_empty() {
        std::fs::write(change_path.join("design.md"), design).context("write design.md")?;
    }

    Ok(change_path)
}

/// Active change directories: everything under `openspec/changes/` except
/// `archive`.
pub fn count_active_changes(worktree: &Path) -> usize {
    let entries = match std::fs::read_dir(changes_dir(worktree)) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };

    entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| e.file_name() != "archive")
        .count()
}
