use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::process::Command;

async fn git_stdout(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .context("Failed to run git")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Top-level directory of the working tree containing `dir`. Inside a linked
/// worktree this is the worktree itself, not the main checkout.
pub async fn resolve_toplevel(dir: &Path) -> Result<PathBuf> {
    let top = git_stdout(dir, &["rev-parse", "--show-toplevel"])
        .await
        .context("not in a git repository")?;
    Ok(PathBuf::from(top))
}

/// Root of the main checkout that owns `dir`, even when `dir` lies inside a
/// linked worktree.
pub async fn resolve_main_root(dir: &Path) -> Result<PathBuf> {
    let common_dir = git_stdout(
        dir,
        &["rev-parse", "--path-format=absolute", "--git-common-dir"],
    )
    .await
    .context("Failed to resolve git root; is this a git repository?")?;

    // --git-common-dir is the shared .git directory; its parent is the main tree
    let common_dir = PathBuf::from(common_dir);
    Ok(common_dir
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dir.to_path_buf()))
}

#[derive(Debug, Clone)]
pub struct GitClient {
    root: PathBuf,
}

impl GitClient {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub async fn open(dir: &Path) -> Result<Self> {
        Ok(Self::new(resolve_toplevel(dir).await?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn run<I, S>(&self, args: I) -> Result<std::process::Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.root);
        tracing::debug!("{:?}", cmd.as_std());
        cmd.output().await.context("Failed to run git")
    }

    /// Branch checked out in the main tree; a detached HEAD reads as `main`.
    pub async fn current_branch(&self) -> String {
        match git_stdout(&self.root, &["symbolic-ref", "--short", "HEAD"]).await {
            Ok(branch) if !branch.is_empty() => branch,
            _ => "main".to_string(),
        }
    }

    pub async fn worktree_add(&self, path: &Path, branch: &str) -> Result<()> {
        let output = self
            .run([
                OsStr::new("worktree"),
                OsStr::new("add"),
                path.as_os_str(),
                OsStr::new("-b"),
                OsStr::new(branch),
            ])
            .await?;

        if !output.status.success() {
            anyhow::bail!(
                "worktree add: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    pub async fn worktree_remove(&self, path: &Path) -> Result<()> {
        let output = self
            .run([
                OsStr::new("worktree"),
                OsStr::new("remove"),
                path.as_os_str(),
                OsStr::new("--force"),
            ])
            .await?;

        if !output.status.success() {
            anyhow::bail!(
                "worktree remove: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    pub async fn merge(&self, branch: &str, message: &str) -> Result<()> {
        let output = self
            .run(["merge", branch, "--no-ff", "-m", message])
            .await?;

        if !output.status.success() {
            let mut detail = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                detail.push('\n');
                detail.push_str(stderr.trim());
            }
            anyhow::bail!("merge: {}", detail.trim());
        }
        Ok(())
    }

    /// Best effort: the branch may already be gone.
    pub async fn delete_branch(&self, branch: &str) {
        match self.run(["branch", "-D", branch]).await {
            Ok(output) if !output.status.success() => {
                tracing::debug!(
                    "git branch -D {} ignored: {}",
                    branch,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("git branch -D {} failed: {}", branch, e),
        }
    }

    #[cfg(test)]
    pub async fn branch_exists(&self, branch: &str) -> bool {
        let reference = format!("refs/heads/{}", branch);
        self.run(["show-ref", "--verify", "--quiet", reference.as_str()])
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}
