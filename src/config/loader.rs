use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::session::BackendKind;

pub const BACKEND_ENV: &str = "AGENT_TEAM_BACKEND";
pub const CONFIG_ENV: &str = "AGENT_TEAM_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub shell_init_ms: u64,
    pub ai_init_ms: u64,
    pub send_enter_delay_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            shell_init_ms: 2000,
            ai_init_ms: 3000,
            send_enter_delay_ms: 100,
        }
    }
}

impl TimeoutConfig {
    /// No waiting at all; used where no real terminal is involved.
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            shell_init_ms: 0,
            ai_init_ms: 0,
            send_enter_delay_ms: 0,
        }
    }

    pub fn shell_init(&self) -> Duration {
        Duration::from_millis(self.shell_init_ms)
    }

    pub fn ai_init(&self) -> Duration {
        Duration::from_millis(self.ai_init_ms)
    }

    pub fn send_enter_delay(&self) -> Duration {
        Duration::from_millis(self.send_enter_delay_ms)
    }
}

/// User-level settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendKind,
    pub default_provider: String,
    pub timeouts: TimeoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            default_provider: "claude".to_string(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path.unwrap_or_else(Self::default_config_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let settings: Settings = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn default_config_path() -> PathBuf {
        if let Some(config_path) = std::env::var_os(CONFIG_ENV) {
            PathBuf::from(config_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("agent-team")
                .join("config.yaml")
        }
    }

    /// The backend environment variable wins over the file.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BACKEND_ENV) {
            self.backend = BackendKind::parse(&value);
        }
        if self.default_provider.trim().is_empty() {
            self.default_provider = "claude".to_string();
        }
        self
    }
}
