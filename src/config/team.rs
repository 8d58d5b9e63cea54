use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// UTC creation stamp written into role and worker configs.
pub fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn load_yaml<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read {} {}", what, path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("parse {} {}", what, path.display()))
}

fn save_yaml<T: Serialize>(value: &T, path: &Path, what: &str) -> Result<()> {
    let yaml = serde_yaml::to_string(value).with_context(|| format!("marshal {}", what))?;
    std::fs::write(path, yaml).with_context(|| format!("write {} {}", what, path.display()))
}

/// Config of a legacy role living in its own worktree
/// (`<worktree>/agents/teams/<name>/config.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub name: String,
    pub description: String,
    pub default_provider: String,
    pub default_model: String,
    pub created_at: String,
    pub pane_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub controller_pane_id: String,
}

impl RoleConfig {
    pub fn new(name: &str, default_provider: &str) -> Self {
        Self {
            name: name.to_string(),
            default_provider: default_provider.to_string(),
            created_at: timestamp_now(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        load_yaml(path, "config")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_yaml(self, path, "config")
    }
}

/// Config of a worker, kept in the main checkout at
/// `agents/workers/<worker-id>/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub worker_id: String,
    pub role: String,
    pub default_provider: String,
    pub default_model: String,
    pub pane_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub controller_pane_id: String,
    pub created_at: String,
}

impl WorkerConfig {
    pub fn new(worker_id: &str, role: &str, default_provider: &str) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            role: role.to_string(),
            default_provider: default_provider.to_string(),
            created_at: timestamp_now(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        load_yaml(path, "worker config")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("create config directory")?;
        }
        save_yaml(self, path, "worker config")
    }
}

/// Pane bookkeeping shared by role and worker configs.
pub trait PaneBinding {
    fn pane_id(&self) -> &str;
    fn default_provider(&self) -> &str;
    fn default_model(&self) -> &str;
    fn bind_pane(&mut self, pane_id: String, controller_pane_id: Option<&str>);
}

macro_rules! impl_pane_binding {
    ($ty:ty) => {
        impl PaneBinding for $ty {
            fn pane_id(&self) -> &str {
                &self.pane_id
            }

            fn default_provider(&self) -> &str {
                &self.default_provider
            }

            fn default_model(&self) -> &str {
                &self.default_model
            }

            fn bind_pane(&mut self, pane_id: String, controller_pane_id: Option<&str>) {
                self.pane_id = pane_id;
                if let Some(controller) = controller_pane_id {
                    self.controller_pane_id = controller.to_string();
                }
            }
        }
    };
}

impl_pane_binding!(RoleConfig);
impl_pane_binding!(WorkerConfig);
