pub const WEZTERM_PANE_ENV: &str = "WEZTERM_PANE";
pub const TMUX_PANE_ENV: &str = "TMUX_PANE";

/// Pane ids the multiplexers export into the shell running this process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneEnv {
    pub wezterm_pane: Option<String>,
    pub tmux_pane: Option<String>,
}

impl PaneEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            wezterm_pane: read(WEZTERM_PANE_ENV),
            tmux_pane: read(TMUX_PANE_ENV),
        }
    }

    /// The pane replies from workers are delivered to.
    pub fn controller_pane(&self) -> Option<&str> {
        self.wezterm_pane
            .as_deref()
            .or(self.tmux_pane.as_deref())
    }

    /// Pane to refocus after spawning a tab. Only WezTerm moves focus.
    pub fn focus_pane(&self) -> Option<&str> {
        self.wezterm_pane.as_deref()
    }
}
