use async_trait::async_trait;
use std::path::Path;

use super::backend::{pane_id_from_stdout, run_checked, SessionBackend, SessionError};
use super::path_to_str;

const TMUX: &str = "tmux";

/// tmux backend. Every worker gets its own detached session; the pane id
/// (`%N`) is globally unique across sessions, so it is the only handle kept.
#[derive(Debug, Clone, Default)]
pub struct TmuxBackend;

impl TmuxBackend {
    pub fn new() -> Self {
        Self
    }
}

fn pane_listed(list_output: &str, pane_id: &str) -> bool {
    list_output.lines().any(|line| line.trim() == pane_id)
}

#[async_trait]
impl SessionBackend for TmuxBackend {
    fn name(&self) -> &'static str {
        TMUX
    }

    async fn pane_alive(&self, pane_id: &str) -> bool {
        if pane_id.is_empty() {
            return false;
        }

        match run_checked(TMUX, &["list-panes", "-a", "-F", "#{pane_id}"]).await {
            Ok(output) => pane_listed(&String::from_utf8_lossy(&output.stdout), pane_id),
            Err(e) => {
                tracing::debug!("tmux list-panes failed: {}", e);
                false
            }
        }
    }

    async fn pane_send(&self, pane_id: &str, text: &str) -> Result<(), SessionError> {
        run_checked(TMUX, &["send-keys", "-t", pane_id, "-l", text]).await?;
        run_checked(TMUX, &["send-keys", "-t", pane_id, "Enter"]).await?;
        Ok(())
    }

    async fn spawn_pane(&self, cwd: &Path, _new_window: bool) -> Result<String, SessionError> {
        let cwd = path_to_str(cwd);
        let output = run_checked(
            TMUX,
            &["new-session", "-d", "-P", "-F", "#{pane_id}", "-c", cwd.as_str()],
        )
        .await?;
        pane_id_from_stdout(TMUX, &output)
    }

    async fn kill_pane(&self, pane_id: &str) -> Result<(), SessionError> {
        run_checked(TMUX, &["kill-pane", "-t", pane_id]).await?;
        Ok(())
    }

    async fn set_title(&self, pane_id: &str, title: &str) -> Result<(), SessionError> {
        run_checked(TMUX, &["rename-window", "-t", pane_id, title]).await?;
        Ok(())
    }

    async fn activate_pane(&self, _pane_id: &str) -> Result<(), SessionError> {
        // tmux sessions are detached; focus never moves.
        Ok(())
    }
}
