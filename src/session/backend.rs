use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

use super::{TmuxBackend, WeztermBackend};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} {action} failed: {stderr}")]
    CommandFailed {
        program: &'static str,
        action: String,
        stderr: String,
    },

    #[error("{0} returned an empty pane id")]
    EmptyPaneId(&'static str),
}

/// Terminal multiplexer operations needed to drive AI sessions in panes.
///
/// Pane ids are opaque strings owned by the multiplexer (`%3` for tmux,
/// `42` for WezTerm).
#[async_trait]
pub trait SessionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Never fails: an empty id or an unreachable multiplexer means "not alive".
    async fn pane_alive(&self, pane_id: &str) -> bool;

    /// Types `text` literally into the pane, then presses Enter.
    async fn pane_send(&self, pane_id: &str, text: &str) -> Result<(), SessionError>;

    async fn spawn_pane(&self, cwd: &Path, new_window: bool) -> Result<String, SessionError>;

    async fn kill_pane(&self, pane_id: &str) -> Result<(), SessionError>;

    async fn set_title(&self, pane_id: &str, title: &str) -> Result<(), SessionError>;

    async fn activate_pane(&self, pane_id: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Wezterm,
    Tmux,
}

impl BackendKind {
    /// `tmux` (any case, surrounding whitespace ignored) selects tmux;
    /// every other value falls back to WezTerm.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("tmux") {
            BackendKind::Tmux
        } else {
            BackendKind::Wezterm
        }
    }

    pub fn create(self, send_enter_delay: Duration) -> Box<dyn SessionBackend> {
        match self {
            BackendKind::Tmux => Box::new(TmuxBackend::new()),
            BackendKind::Wezterm => Box::new(WeztermBackend::new(send_enter_delay)),
        }
    }
}

pub(crate) async fn run_checked(
    program: &'static str,
    args: &[&str],
) -> Result<Output, SessionError> {
    tracing::debug!("{} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| SessionError::Spawn { program, source })?;

    if !output.status.success() {
        return Err(SessionError::CommandFailed {
            program,
            action: args.iter().take(2).copied().collect::<Vec<_>>().join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

pub(crate) fn pane_id_from_stdout(
    program: &'static str,
    output: &Output,
) -> Result<String, SessionError> {
    let pane_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if pane_id.is_empty() {
        return Err(SessionError::EmptyPaneId(program));
    }
    Ok(pane_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_defaults_to_wezterm() {
        assert_eq!(
            BackendKind::parse(""),
            BackendKind::Wezterm,
            "BackendKind::parse: empty value should select wezterm"
        );
        assert_eq!(
            BackendKind::parse("screen"),
            BackendKind::Wezterm,
            "BackendKind::parse: unknown value should select wezterm"
        );
    }

    #[test]
    fn backend_kind_selects_tmux_case_insensitive() {
        assert_eq!(BackendKind::parse("tmux"), BackendKind::Tmux);
        assert_eq!(BackendKind::parse("  TMUX \n"), BackendKind::Tmux);
        assert_eq!(BackendKind::parse("Tmux"), BackendKind::Tmux);
    }

    #[test]
    fn backend_kind_create_returns_matching_backend() {
        let delay = Duration::from_millis(0);
        assert_eq!(BackendKind::Tmux.create(delay).name(), "tmux");
        assert_eq!(BackendKind::Wezterm.create(delay).name(), "wezterm");
    }

    #[test]
    fn backend_kind_deserializes_lowercase() {
        let kind: BackendKind = serde_yaml::from_str("tmux").unwrap();
        assert_eq!(kind, BackendKind::Tmux);
    }

    #[tokio::test]
    async fn run_checked_reports_missing_program() {
        let result = run_checked("agent-team-no-such-program", &["x"]).await;
        assert!(
            matches!(result, Err(SessionError::Spawn { .. })),
            "run_checked: missing program should be a Spawn error"
        );
    }

    #[tokio::test]
    async fn run_checked_rejects_non_zero_exit() {
        let result = run_checked("false", &[]).await;
        assert!(
            matches!(result, Err(SessionError::CommandFailed { program: "false", .. })),
            "run_checked: non-zero exit should be a CommandFailed error"
        );
    }

    #[test]
    fn pane_id_from_stdout_trims_output() {
        let output = std::process::Command::new("echo").arg("%4").output().unwrap();
        assert_eq!(pane_id_from_stdout("tmux", &output).unwrap(), "%4");
    }

    #[test]
    fn pane_id_from_stdout_rejects_empty_output() {
        let output = std::process::Command::new("true").output().unwrap();
        assert!(
            matches!(
                pane_id_from_stdout("wezterm", &output),
                Err(SessionError::EmptyPaneId("wezterm"))
            ),
            "pane_id_from_stdout: blank stdout should be an EmptyPaneId error"
        );
    }
}
