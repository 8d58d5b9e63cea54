use anyhow::Result;

use crate::commands::common::App;
use crate::team::list_available_roles;

pub async fn execute_list() -> Result<()> {
    let app = App::from_cwd().await?;
    print!("{}", render_list(&app));
    Ok(())
}

pub fn render_list(app: &App) -> String {
    let roles = list_available_roles(&app.layout);
    if roles.is_empty() {
        return "No roles found. Create one using the role-creator skill.\n".to_string();
    }

    let mut out = format!("{:<24} {}\n", "Role", "Path");
    out.push_str(&format!("{:<24} {}\n", "─".repeat(24), "─".repeat(26)));
    for role in roles {
        out.push_str(&format!(
            "{:<24} {}\n",
            role,
            app.layout.role_dir(&role).display()
        ));
    }
    out
}
