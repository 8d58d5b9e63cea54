use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangePhase {
    Planning,
    Implementing,
    Ready,
    Completed,
}

impl ChangePhase {
    pub const ALL: [ChangePhase; 4] = [
        ChangePhase::Planning,
        ChangePhase::Implementing,
        ChangePhase::Ready,
        ChangePhase::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangePhase::Planning => "planning",
            ChangePhase::Implementing => "implementing",
            ChangePhase::Ready => "ready",
            ChangePhase::Completed => "completed",
        }
    }
}

impl fmt::Display for ChangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatus {
    pub name: String,
    pub phase: ChangePhase,
}

#[derive(Debug, Deserialize)]
struct StatusJson {
    #[serde(default)]
    changes: Vec<ChangeJson>,
}

#[derive(Debug, Deserialize)]
struct ChangeJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    artifacts: HashMap<String, ArtifactJson>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtifactJson {
    #[serde(default)]
    status: String,
}

const DONE: &str = "done";
const IN_PROGRESS: &str = "in_progress";

fn artifact_status<'a>(artifacts: &'a HashMap<String, ArtifactJson>, key: &str) -> &'a str {
    artifacts.get(key).map(|a| a.status.as_str()).unwrap_or("")
}

fn classify_phase(artifacts: &HashMap<String, ArtifactJson>) -> ChangePhase {
    if artifact_status(artifacts, "tasks") == DONE {
        if artifact_status(artifacts, "verify") == DONE {
            return ChangePhase::Completed;
        }
        return ChangePhase::Ready;
    }

    if artifact_status(artifacts, "proposal") == DONE
        && artifacts.values().any(|a| a.status == IN_PROGRESS)
    {
        return ChangePhase::Implementing;
    }

    ChangePhase::Planning
}

/// Parse the output of `openspec status --json`.
pub fn parse_status(json: &str) -> Result<Vec<ChangeStatus>> {
    let raw: StatusJson = serde_json::from_str(json).context("parse openspec status")?;
    Ok(raw
        .changes
        .into_iter()
        .map(|c| ChangeStatus {
            phase: classify_phase(&c.artifacts),
            name: c.name,
        })
        .collect())
}

/// `N active`, followed by a per-phase breakdown when phases are known.
pub fn change_summary(active: usize, statuses: &[ChangeStatus]) -> String {
    if active == 0 {
        return "0".to_string();
    }

    let breakdown: Vec<String> = ChangePhase::ALL
        .iter()
        .filter_map(|phase| {
            let count = statuses.iter().filter(|s| s.phase == *phase).count();
            (count > 0).then(|| format!("{} {}", count, phase))
        })
        .collect();

    if breakdown.is_empty() {
        format!("{} active", active)
    } else {
        format!("{} active ({})", active, breakdown.join(", "))
    }
}
