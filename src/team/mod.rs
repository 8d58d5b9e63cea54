mod error;
mod paths;
mod role;
mod worker;

pub use error::TeamError;
pub use paths::TeamLayout;
pub use role::{list_available_roles, list_legacy_roles};
pub use worker::{list_workers, next_worker_id, WorkerInfo};

/// Prefix of every branch created for a role or worker worktree.
const BRANCH_PREFIX: &str = "team/";

pub fn branch_name(id: &str) -> String {
    format!("{}{}", BRANCH_PREFIX, id)
}
