use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamError {
    #[error("role '{0}' not found")]
    RoleNotFound(String),

    #[error("role '{0}' not found in agents/teams/ or global skills.\nCreate it first using the role-creator skill")]
    RoleDefinitionNotFound(String),

    #[error("role '{name}' already exists at {path}")]
    RoleExists { name: String, path: String },

    #[error("worker '{0}' not found")]
    WorkerNotFound(String),

    #[error("worker '{id}' already exists at {path}")]
    WorkerExists { id: String, path: String },

    #[error("worker worktree '{id}' not found at {path}")]
    WorktreeMissing { id: String, path: String },

    #[error("'{0}' is not running")]
    NotRunning(String),

    #[error("no roles found. Create one with: agent-team create <name>")]
    NoRoles,

    #[error("no controller pane ID stored for '{0}'; was the session opened with agent-team?")]
    NoControllerPane(String),

    #[error("main controller (pane {0}) is not running")]
    ControllerOffline(String),

    #[error("not in a worker or role worktree ({0})")]
    NotInWorktree(String),
}
