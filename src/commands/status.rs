use anyhow::Result;
use futures::future::join_all;

use crate::commands::common::{self, App};
use crate::config::RoleConfig;
use crate::team::list_legacy_roles;

pub async fn execute() -> Result<()> {
    let app = App::from_cwd().await?;
    print!("{}", render(&app).await);
    Ok(())
}

async fn role_row(app: &App, role: &str) -> String {
    let pane_id = RoleConfig::load(&app.layout.legacy_config_path(role))
        .map(|c| c.pane_id)
        .unwrap_or_default();

    let worktree = app.layout.worktree_path(role);
    let (running, changes) = tokio::join!(
        common::running_column(app, &pane_id),
        common::changes_column(app, &worktree),
    );
    format!("{:<16} {:<24} {}\n", role, running, changes)
}

pub async fn render(app: &App) -> String {
    let roles = list_legacy_roles(&app.layout);
    if roles.is_empty() {
        return "No roles found. Create one with: agent-team create <name>\n".to_string();
    }

    let mut out = format!("{:<16} {:<24} {}\n", "Role", "Status", "Changes");
    out.push_str(&format!(
        "{:<16} {:<24} {}\n",
        "─".repeat(16),
        "─".repeat(24),
        "─".repeat(26)
    ));

    let rows = join_all(roles.iter().map(|role| role_row(app, role))).await;
    for row in rows {
        out.push_str(&row);
    }
    out
}
