use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{ChangeStatus, SpecTool};

#[derive(Debug, Default)]
struct State {
    installs: usize,
    inits: Vec<PathBuf>,
    statuses: HashMap<PathBuf, Vec<ChangeStatus>>,
    fail_init: bool,
}

/// Records calls instead of running `openspec`.
#[derive(Debug, Default, Clone)]
pub struct FakeSpecTool {
    state: Arc<Mutex<State>>,
}

impl FakeSpecTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, dir: &Path, statuses: Vec<ChangeStatus>) -> Self {
        self.state
            .lock()
            .unwrap()
            .statuses
            .insert(dir.to_path_buf(), statuses);
        self
    }

    pub fn with_failing_init(self) -> Self {
        self.state.lock().unwrap().fail_init = true;
        self
    }

    pub fn installs(&self) -> usize {
        self.state.lock().unwrap().installs
    }

    pub fn inits(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().inits.clone()
    }
}

#[async_trait]
impl SpecTool for FakeSpecTool {
    async fn ensure_installed(&self) -> Result<()> {
        self.state.lock().unwrap().installs += 1;
        Ok(())
    }

    async fn init(&self, dir: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.inits.push(dir.to_path_buf());
        if state.fail_init {
            bail!("openspec init failed");
        }
        Ok(())
    }

    async fn status(&self, dir: &Path) -> Result<Vec<ChangeStatus>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .statuses
            .get(dir)
            .cloned()
            .unwrap_or_default())
    }
}
