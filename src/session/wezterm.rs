use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::sleep;

use super::backend::{pane_id_from_stdout, run_checked, SessionBackend, SessionError};
use super::path_to_str;

const WEZTERM: &str = "wezterm";

/// WezTerm backend, driven through `wezterm cli`. New panes open as tabs in
/// the current window unless a new window is requested.
#[derive(Debug, Clone)]
pub struct WeztermBackend {
    send_enter_delay: Duration,
}

impl WeztermBackend {
    pub fn new(send_enter_delay: Duration) -> Self {
        Self { send_enter_delay }
    }

    async fn send_text(&self, pane_id: &str, text: &str) -> Result<(), SessionError> {
        tracing::debug!("wezterm cli send-text --pane-id {} ({} bytes)", pane_id, text.len());

        let mut child = Command::new(WEZTERM)
            .args(["cli", "send-text", "--pane-id", pane_id, "--no-paste"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SessionError::Spawn {
                program: WEZTERM,
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|source| SessionError::Spawn {
                    program: WEZTERM,
                    source,
                })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| SessionError::Spawn {
                program: WEZTERM,
                source,
            })?;

        if !output.status.success() {
            return Err(SessionError::CommandFailed {
                program: WEZTERM,
                action: "cli send-text".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// `wezterm cli list` prints a header row, then one row per pane with the
/// pane id in the third column.
fn pane_listed(list_output: &str, pane_id: &str) -> bool {
    list_output.lines().skip(1).any(|line| {
        line.split_whitespace()
            .nth(2)
            .map(|id| id == pane_id)
            .unwrap_or(false)
    })
}

#[async_trait]
impl SessionBackend for WeztermBackend {
    fn name(&self) -> &'static str {
        WEZTERM
    }

    async fn pane_alive(&self, pane_id: &str) -> bool {
        if pane_id.is_empty() {
            return false;
        }

        match run_checked(WEZTERM, &["cli", "list"]).await {
            Ok(output) => pane_listed(&String::from_utf8_lossy(&output.stdout), pane_id),
            Err(e) => {
                tracing::debug!("wezterm cli list failed: {}", e);
                false
            }
        }
    }

    async fn pane_send(&self, pane_id: &str, text: &str) -> Result<(), SessionError> {
        self.send_text(pane_id, text).await?;
        sleep(self.send_enter_delay).await;
        self.send_text(pane_id, "\r").await
    }

    async fn spawn_pane(&self, cwd: &Path, new_window: bool) -> Result<String, SessionError> {
        let cwd = path_to_str(cwd);
        let mut args = vec!["cli", "spawn", "--cwd", cwd.as_str()];
        if new_window {
            args.push("--new-window");
        }

        let output = run_checked(WEZTERM, &args).await?;
        pane_id_from_stdout(WEZTERM, &output)
    }

    async fn kill_pane(&self, pane_id: &str) -> Result<(), SessionError> {
        run_checked(WEZTERM, &["cli", "kill-pane", "--pane-id", pane_id]).await?;
        Ok(())
    }

    async fn set_title(&self, pane_id: &str, title: &str) -> Result<(), SessionError> {
        run_checked(WEZTERM, &["cli", "set-tab-title", "--pane-id", pane_id, title]).await?;
        Ok(())
    }

    async fn activate_pane(&self, pane_id: &str) -> Result<(), SessionError> {
        run_checked(WEZTERM, &["cli", "activate-pane", "--pane-id", pane_id]).await?;
        Ok(())
    }
}
