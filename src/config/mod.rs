mod env;
mod loader;
mod team;

pub use env::PaneEnv;
pub use loader::Settings;
#[cfg(test)]
pub use loader::TimeoutConfig;
pub use team::{timestamp_now, PaneBinding, RoleConfig, WorkerConfig};
