use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::{parse_status, ChangeStatus, SpecTool};

const OPENSPEC: &str = "openspec";
const NPM_PACKAGE: &str = "@fission-ai/openspec@latest";
const INIT_TOOLS: &str = "claude,codex,opencode";

/// First executable named `program` on `search_path`.
fn find_in_path(program: &str, search_path: Option<OsString>) -> Option<PathBuf> {
    which::which_in(program, search_path, ".").ok()
}

/// The `openspec` command line tool.
#[derive(Debug, Default, Clone)]
pub struct OpenSpecCli;

impl OpenSpecCli {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpecTool for OpenSpecCli {
    async fn ensure_installed(&self) -> Result<()> {
        if let Some(path) = find_in_path(OPENSPEC, std::env::var_os("PATH")) {
            tracing::debug!("openspec found at {}", path.display());
            return Ok(());
        }

        println!("OpenSpec not found, installing...");
        tracing::debug!("npm install -g {}", NPM_PACKAGE);
        let status = Command::new("npm")
            .args(["install", "-g", NPM_PACKAGE])
            .status()
            .await
            .context("Failed to run npm")?;
        if !status.success() {
            bail!("npm install -g {} failed ({})", NPM_PACKAGE, status);
        }
        Ok(())
    }

    async fn init(&self, dir: &Path) -> Result<()> {
        tracing::debug!("openspec init --tools {} in {}", INIT_TOOLS, dir.display());
        let status = Command::new(OPENSPEC)
            .args(["init", "--tools", INIT_TOOLS])
            .current_dir(dir)
            .status()
            .await
            .context("Failed to run openspec")?;
        if !status.success() {
            bail!("openspec init failed ({})", status);
        }
        Ok(())
    }

    async fn status(&self, dir: &Path) -> Result<Vec<ChangeStatus>> {
        tracing::debug!("openspec status --json in {}", dir.display());
        let output = match Command::new(OPENSPEC)
            .args(["status", "--json"])
            .current_dir(dir)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
        {
            Ok(output) if output.status.success() => output,
            Ok(_) | Err(_) => return Ok(Vec::new()),
        };

        parse_status(&String::from_utf8_lossy(&output.stdout))
    }
}
