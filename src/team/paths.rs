use std::path::{Path, PathBuf};

const DEFAULT_WT_BASE: &str = ".worktrees";

/// Pick the worktree base directory name under `root`: an existing
/// `.worktrees/` wins, then `worktrees/`, else `.worktrees`.
pub fn find_wt_base(root: &Path) -> String {
    for candidate in [DEFAULT_WT_BASE, "worktrees"] {
        if root.join(candidate).is_dir() {
            return candidate.to_string();
        }
    }
    DEFAULT_WT_BASE.to_string()
}

/// Path conventions of a repository managed by agent-team.
///
/// Role definitions and worker configs live in the main checkout under
/// `agents/`; every worker or legacy role gets a worktree under `wt_base`.
#[derive(Debug, Clone)]
pub struct TeamLayout {
    root: PathBuf,
    wt_base: String,
}

impl TeamLayout {
    pub fn new(root: PathBuf, wt_base: impl Into<String>) -> Self {
        Self {
            root,
            wt_base: wt_base.into(),
        }
    }

    pub fn detect(root: PathBuf) -> Self {
        let wt_base = find_wt_base(&root);
        Self::new(root, wt_base)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn wt_base(&self) -> &str {
        &self.wt_base
    }

    pub fn teams_dir(&self) -> PathBuf {
        self.root.join("agents").join("teams")
    }

    pub fn workers_dir(&self) -> PathBuf {
        self.root.join("agents").join("workers")
    }

    pub fn role_dir(&self, role: &str) -> PathBuf {
        self.teams_dir().join(role)
    }

    pub fn role_yaml_path(&self, role: &str) -> PathBuf {
        self.role_dir(role).join("references").join("role.yaml")
    }

    pub fn role_system_md_path(&self, role: &str) -> PathBuf {
        self.role_dir(role).join("system.md")
    }

    pub fn worker_dir(&self, worker_id: &str) -> PathBuf {
        self.workers_dir().join(worker_id)
    }

    pub fn worker_config_path(&self, worker_id: &str) -> PathBuf {
        self.worker_dir(worker_id).join("config.yaml")
    }

    /// Worktree of a worker or a legacy role.
    pub fn worktree_path(&self, name: &str) -> PathBuf {
        self.root.join(&self.wt_base).join(name)
    }

    pub fn legacy_teams_dir(&self, name: &str) -> PathBuf {
        self.worktree_path(name)
            .join("agents")
            .join("teams")
            .join(name)
    }

    pub fn legacy_config_path(&self, name: &str) -> PathBuf {
        self.legacy_teams_dir(name).join("config.yaml")
    }
}
