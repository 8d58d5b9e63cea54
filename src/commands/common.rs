use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;
use tokio::time::sleep;

use crate::config::{PaneBinding, PaneEnv, Settings};
use crate::openspec::{change_summary, count_active_changes, create_change, OpenSpecCli, SpecTool};
use crate::session::{GitClient, SessionBackend};
use crate::skills::SkillResolver;
use crate::team::TeamLayout;
use crate::utils::{build_launch_cmd, change_name, change_notice};

/// Everything a command needs about the repository it runs in.
pub struct App {
    pub git: GitClient,
    pub layout: TeamLayout,
    pub session: Box<dyn SessionBackend>,
    pub spec: Box<dyn SpecTool>,
    pub skills: SkillResolver,
    pub settings: Settings,
    pub panes: PaneEnv,
}

impl App {
    pub fn new(
        git: GitClient,
        settings: Settings,
        panes: PaneEnv,
        session: Box<dyn SessionBackend>,
        spec: Box<dyn SpecTool>,
    ) -> Self {
        let layout = TeamLayout::detect(git.root().to_path_buf());
        let skills = SkillResolver::new(layout.clone());
        Self {
            git,
            layout,
            session,
            spec,
            skills,
            settings,
            panes,
        }
    }

    pub async fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir().context("get working directory")?;
        let git = GitClient::open(&cwd)
            .await
            .map_err(|_| anyhow!("not in a git repository"))?;
        let settings = load_settings()?;
        let session = settings
            .backend
            .create(settings.timeouts.send_enter_delay());
        tracing::debug!("using {} backend", session.name());

        Ok(Self::new(
            git,
            settings,
            PaneEnv::from_env(),
            session,
            Box::new(OpenSpecCli::new()),
        ))
    }

    /// Explicit provider, then the one stored in the config, then the
    /// configured default.
    pub fn resolve_provider(&self, requested: Option<&str>, configured: &str) -> String {
        [requested.unwrap_or(""), configured]
            .into_iter()
            .find(|p| !p.is_empty())
            .unwrap_or(self.settings.default_provider.as_str())
            .to_string()
    }
}

/// An explicit `-m` wins over the model stored in the config.
pub fn resolve_model<C: PaneBinding>(requested: &str, config: &C) -> String {
    if requested.is_empty() {
        config.default_model().to_string()
    } else {
        requested.to_string()
    }
}

pub fn load_settings() -> Result<Settings> {
    Ok(Settings::load(None)?.with_env(|key| std::env::var(key).ok()))
}

/// Contents of `path`, stdin for `-`, empty when no path was given.
pub fn read_input(path: Option<&str>, what: &str) -> Result<String> {
    match path {
        None => Ok(String::new()),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| format!("read {}", what))?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("read {}", what)),
    }
}

/// Spawn a pane in `worktree`, title it, hand focus back to the controller
/// and record both pane ids in `config`. The caller persists the config.
pub async fn spawn_session<C: PaneBinding>(
    app: &App,
    config: &mut C,
    worktree: &Path,
    title: &str,
    new_window: bool,
) -> Result<String> {
    let pane_id = app
        .session
        .spawn_pane(worktree, new_window)
        .await
        .with_context(|| format!("failed to open session for '{}'", title))?;

    if let Err(e) = app.session.set_title(&pane_id, title).await {
        tracing::warn!("set title on pane {}: {}", pane_id, e);
    }

    if !new_window {
        if let Some(focus) = app.panes.focus_pane() {
            if let Err(e) = app.session.activate_pane(focus).await {
                tracing::warn!("activate pane {}: {}", focus, e);
            }
        }
    }

    config.bind_pane(pane_id.clone(), app.panes.controller_pane());
    Ok(pane_id)
}

pub async fn launch_ai(app: &App, pane_id: &str, provider: &str, model: &str) -> Result<()> {
    println!("  Waiting for shell to initialize...");
    sleep(app.settings.timeouts.shell_init()).await;

    app.session
        .pane_send(pane_id, &build_launch_cmd(provider, model))
        .await
        .context("send launch command")?;
    Ok(())
}

pub async fn wait_for_ai(app: &App) {
    println!("  Waiting for AI to initialize...");
    sleep(app.settings.timeouts.ai_init()).await;
}

/// Create a timestamped change for `desc` in `worktree` and return its name.
pub fn create_change_for(
    worktree: &Path,
    desc: &str,
    proposal: &str,
    design: &str,
) -> Result<String> {
    let name = change_name(desc);
    let path = create_change(worktree, &name, proposal, design)?;
    println!("✓ Change created: {}", path.display());
    Ok(name)
}

pub async fn notify_change(app: &App, pane_id: &str, desc: &str, change: &str) -> Result<()> {
    app.session
        .pane_send(pane_id, &change_notice(desc, change))
        .await
        .context("notify session")?;
    Ok(())
}

/// Kill `pane_id` when it is still alive. Failures only warn.
pub async fn close_pane(app: &App, pane_id: &str) {
    if !app.session.pane_alive(pane_id).await {
        return;
    }
    if let Err(e) = app.session.kill_pane(pane_id).await {
        tracing::debug!("kill pane {}: {}", pane_id, e);
        eprintln!(
            "Warning: failed to close pane {}; continuing delete",
            pane_id
        );
    }
}

/// `git worktree remove --force`, falling back to deleting the directory.
pub async fn remove_worktree(app: &App, worktree: &Path) {
    if let Err(e) = app.git.worktree_remove(worktree).await {
        tracing::warn!("{:#}; removing {} directly", e, worktree.display());
        if let Err(e) = std::fs::remove_dir_all(worktree) {
            eprintln!("Warning: failed to remove {}: {}", worktree.display(), e);
        }
    }
}

pub async fn changes_column(app: &App, worktree: &Path) -> String {
    let active = count_active_changes(worktree);
    if active == 0 {
        return change_summary(0, &[]);
    }

    let statuses = match app.spec.status(worktree).await {
        Ok(statuses) => statuses,
        Err(e) => {
            tracing::warn!("change status for {}: {:#}", worktree.display(), e);
            Vec::new()
        }
    };
    change_summary(active, &statuses)
}

pub async fn running_column(app: &App, pane_id: &str) -> String {
    if app.session.pane_alive(pane_id).await {
        format!("✓ running [p:{}]", pane_id)
    } else {
        "✗ offline".to_string()
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::config::TimeoutConfig;
    use crate::openspec::FakeSpecTool;
    use crate::session::MockBackend;

    pub const CONTROLLER_PANE: &str = "ctl-1";

    /// App over `root` with instant timeouts and a WezTerm controller pane.
    pub fn test_app(root: &Path, session: MockBackend, spec: FakeSpecTool) -> App {
        let settings = Settings {
            timeouts: TimeoutConfig::immediate(),
            ..Settings::default()
        };
        let panes = PaneEnv {
            wezterm_pane: Some(CONTROLLER_PANE.to_string()),
            tmux_pane: None,
        };
        let mut app = App::new(
            GitClient::new(root.to_path_buf()),
            settings,
            panes,
            Box::new(session),
            Box::new(spec),
        );
        app.skills = app.skills.clone().with_global_dir(None);
        app
    }
}


#[cfg(test)]
mod property_tests {
    use super::test_support::test_app;
    use super::*;
    use crate::openspec::FakeSpecTool;
    use crate::session::MockBackend;
    use proptest::prelude::*;
    use tempfile::TempDir;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn changes_column_counts_every_active_change(
            names in prop::collection::btree_set("c[a-z0-9]{0,7}", 0..6),
            archived in any::<bool>(),
        ) {
            tokio_test::block_on(async {
                let tmp = TempDir::new().unwrap();
                let app = test_app(tmp.path(), MockBackend::new(), FakeSpecTool::new());
                for name in &names {
                    create_change(tmp.path(), name, "", "").unwrap();
                }
                if archived {
                    let archive = tmp.path().join("openspec/changes/archive/old");
                    std::fs::create_dir_all(archive).unwrap();
                }

                let expected = if names.is_empty() {
                    "0".to_string()
                } else {
                    format!("{} active", names.len())
                };
                assert_eq!(changes_column(&app, tmp.path()).await, expected);
            });
        }
    }
}
