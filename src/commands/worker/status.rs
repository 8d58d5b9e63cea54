use anyhow::Result;
use futures::future::join_all;

use crate::commands::common::{self, App};
use crate::team::{list_workers, WorkerInfo};

pub async fn execute() -> Result<()> {
    let app = App::from_cwd().await?;
    print!("{}", render(&app).await);
    Ok(())
}

async fn worker_row(app: &App, worker: &WorkerInfo) -> String {
    let worktree = app.layout.worktree_path(&worker.worker_id);
    let (running, changes) = tokio::join!(
        common::running_column(app, &worker.config.pane_id),
        common::changes_column(app, &worktree),
    );
    format!(
        "{:<24} {:<16} {:<24} {}\n",
        worker.worker_id, worker.role, running, changes
    )
}

pub async fn render(app: &App) -> String {
    let workers = list_workers(&app.layout);
    if workers.is_empty() {
        return "No workers found. Create one with: agent-team worker create <role-name>\n"
            .to_string();
    }

    let mut out = format!(
        "{:<24} {:<16} {:<24} {}\n",
        "Worker", "Role", "Status", "Changes"
    );
    out.push_str(&format!(
        "{:<24} {:<16} {:<24} {}\n",
        "─".repeat(24),
        "─".repeat(16),
        "─".repeat(24),
        "─".repeat(26)
    ));

    let rows = join_all(workers.iter().map(|w| worker_row(app, w))).await;
    for row in rows {
        out.push_str(&row);
    }
    out
}
