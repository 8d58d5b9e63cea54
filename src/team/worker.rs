use regex::Regex;
use std::sync::OnceLock;

use super::TeamLayout;
use crate::config::WorkerConfig;

#[derive(Debug, Clone)]
pub struct WorkerInfo {
    pub worker_id: String,
    pub role: String,
    pub config: WorkerConfig,
}

fn worker_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(.+)-(\d{3})$").expect("valid worker id regex"))
}

/// Workers with a loadable `config.yaml`, sorted by id. Broken configs are
/// skipped.
pub fn list_workers(layout: &TeamLayout) -> Vec<WorkerInfo> {
    let entries = match std::fs::read_dir(layout.workers_dir()) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut workers: Vec<WorkerInfo> = entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|e| {
            let worker_id = e.file_name().to_str()?.to_string();
            match WorkerConfig::load(&layout.worker_config_path(&worker_id)) {
                Ok(config) => Some(WorkerInfo {
                    role: config.role.clone(),
                    worker_id,
                    config,
                }),
                Err(err) => {
                    tracing::debug!("skipping worker {}: {:#}", worker_id, err);
                    None
                }
            }
        })
        .collect();

    workers.sort_by(|a, b| a.worker_id.cmp(&b.worker_id));
    workers
}

/// Next free id for `role`: one past the highest `<role>-NNN` directory.
/// Gaps left by deleted workers are not reused.
pub fn next_worker_id(layout: &TeamLayout, role: &str) -> String {
    let max = std::fs::read_dir(layout.workers_dir())
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
                .filter_map(|e| e.file_name().to_str().and_then(|n| worker_number(n, role)))
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0);

    format!("{}-{:03}", role, max + 1)
}

fn worker_number(dir_name: &str, role: &str) -> Option<u32> {
    let caps = worker_id_pattern().captures(dir_name)?;
    if &caps[1] != role {
        return None;
    }
    caps[2].parse().ok()
}
