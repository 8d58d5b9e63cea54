use anyhow::Result;
use clap::Args as ClapArgs;

use crate::commands::common::{self, App};
use crate::config::RoleConfig;
use crate::team::{branch_name, TeamError};

#[derive(ClapArgs)]
pub struct Args {
    /// Role name
    pub name: String,
}

pub async fn execute(args: Args) -> Result<()> {
    let app = App::from_cwd().await?;
    run(&app, &args.name).await
}

pub async fn run(app: &App, name: &str) -> Result<()> {
    let worktree = app.layout.worktree_path(name);
    if !worktree.exists() {
        return Err(TeamError::RoleNotFound(name.to_string()).into());
    }

    println!("Deleting role '{}'...", name);

    if let Ok(config) = RoleConfig::load(&app.layout.legacy_config_path(name)) {
        common::close_pane(app, &config.pane_id).await;
    }

    common::remove_worktree(app, &worktree).await;
    app.git.delete_branch(&branch_name(name)).await;

    println!("✓ Deleted role '{}'", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::test_support::test_app;
    use crate::commands::create;
    use crate::openspec::FakeSpecTool;
    use crate::session::MockBackend;
    use crate::testutil::init_test_repo;

    #[tokio::test]
    async fn delete_kills_pane_and_removes_worktree_and_branch() {
        let (_tmp, root) = init_test_repo();
        let mock = MockBackend::new().with_alive("6");
        let app = test_app(&root, mock.clone(), FakeSpecTool::new());
        create::run(&app, "qa").await.unwrap();

        let path = app.layout.legacy_config_path("qa");
        let mut config = RoleConfig::load(&path).unwrap();
        config.pane_id = "6".to_string();
        config.save(&path).unwrap();

        run(&app, "qa").await.unwrap();

        assert_eq!(mock.killed(), vec!["6".to_string()]);
        assert!(!app.layout.worktree_path("qa").exists());
        assert!(!app.git.branch_exists("team/qa").await);
    }

    #[tokio::test]
    async fn delete_continues_when_kill_fails() {
        let (_tmp, root) = init_test_repo();
        let mock = MockBackend::new().with_alive("6").with_failing_kill();
        let app = test_app(&root, mock, FakeSpecTool::new());
        create::run(&app, "qa").await.unwrap();

        let path = app.layout.legacy_config_path("qa");
        let mut config = RoleConfig::load(&path).unwrap();
        config.pane_id = "6".to_string();
        config.save(&path).unwrap();

        run(&app, "qa").await.unwrap();
        assert!(!app.layout.worktree_path("qa").exists());
    }

    #[tokio::test]
    async fn delete_falls_back_to_removing_plain_directory() {
        let (_tmp, root) = init_test_repo();
        let app = test_app(&root, MockBackend::new(), FakeSpecTool::new());
        let stray = app.layout.worktree_path("stray");
        std::fs::create_dir_all(stray.join("nested")).unwrap();

        run(&app, "stray").await.unwrap();
        assert!(
            !stray.exists(),
            "delete: a directory git does not know should still be removed"
        );
    }

    #[tokio::test]
    async fn delete_unknown_role_fails() {
        let (_tmp, root) = init_test_repo();
        let app = test_app(&root, MockBackend::new(), FakeSpecTool::new());

        let err = run(&app, "ghost").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<TeamError>(),
            Some(&TeamError::RoleNotFound("ghost".to_string()))
        );
    }
}
