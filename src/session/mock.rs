use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::backend::{SessionBackend, SessionError};

/// In-memory backend. Clones share state, so a test keeps one handle while
/// the app owns another.
#[derive(Clone, Default)]
pub struct MockBackend {
    alive: Arc<Mutex<HashSet<String>>>,
    sent: Arc<Mutex<Vec<(String, String)>>>,
    spawned: Arc<Mutex<Vec<(PathBuf, bool)>>>,
    titles: Arc<Mutex<Vec<(String, String)>>>,
    killed: Arc<Mutex<Vec<String>>>,
    activated: Arc<Mutex<Vec<String>>>,
    spawn_id: Arc<Mutex<String>>,
    fail_kill: Arc<Mutex<bool>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panes spawned by this mock get `pane_id` and are alive afterwards.
    pub fn with_spawn_id(self, pane_id: &str) -> Self {
        *self.spawn_id.lock().unwrap() = pane_id.to_string();
        self
    }

    pub fn with_alive(self, pane_id: &str) -> Self {
        self.alive.lock().unwrap().insert(pane_id.to_string());
        self
    }

    pub fn with_failing_kill(self) -> Self {
        *self.fail_kill.lock().unwrap() = true;
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }

    pub fn spawned(&self) -> Vec<(PathBuf, bool)> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<(String, String)> {
        self.titles.lock().unwrap().clone()
    }

    pub fn killed(&self) -> Vec<String> {
        self.killed.lock().unwrap().clone()
    }

    pub fn activated(&self) -> Vec<String> {
        self.activated.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn pane_alive(&self, pane_id: &str) -> bool {
        !pane_id.is_empty() && self.alive.lock().unwrap().contains(pane_id)
    }

    async fn pane_send(&self, pane_id: &str, text: &str) -> Result<(), SessionError> {
        self.sent
            .lock()
            .unwrap()
            .push((pane_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn spawn_pane(&self, cwd: &Path, new_window: bool) -> Result<String, SessionError> {
        self.spawned
            .lock()
            .unwrap()
            .push((cwd.to_path_buf(), new_window));

        let pane_id = self.spawn_id.lock().unwrap().clone();
        if pane_id.is_empty() {
            return Err(SessionError::EmptyPaneId("mock"));
        }
        self.alive.lock().unwrap().insert(pane_id.clone());
        Ok(pane_id)
    }

    async fn kill_pane(&self, pane_id: &str) -> Result<(), SessionError> {
        if *self.fail_kill.lock().unwrap() {
            return Err(SessionError::CommandFailed {
                program: "mock",
                action: "kill-pane".to_string(),
                stderr: "refused".to_string(),
            });
        }
        self.killed.lock().unwrap().push(pane_id.to_string());
        self.alive.lock().unwrap().remove(pane_id);
        Ok(())
    }

    async fn set_title(&self, pane_id: &str, title: &str) -> Result<(), SessionError> {
        self.titles
            .lock()
            .unwrap()
            .push((pane_id.to_string(), title.to_string()));
        Ok(())
    }

    async fn activate_pane(&self, pane_id: &str) -> Result<(), SessionError> {
        self.activated.lock().unwrap().push(pane_id.to_string());
        Ok(())
    }
}
