use anyhow::{Context, Result};
use minijinja::Environment;
use std::path::Path;

use super::inject::inject_section;
use crate::team::{branch_name, TeamLayout};

pub const SECTION_TAG: &str = "AGENT_TEAM";

const ROLE_SECTION_TEMPLATE: &str = r#"{{ prompt }}
## Development Environment

You are working in an **isolated git worktree**. All development MUST happen here:

- **Working directory**: `{{ worktree }}`
- **Git branch**: `{{ branch }}` (your dedicated branch)
- **Main project root**: `{{ root }}`

### Git Rules

- All changes and commits go to the `{{ branch }}` branch, which is already checked out
- **Never** run `git checkout`, `git switch`, or change branches
- **Never** merge or rebase from within this worktree
- Commit regularly with clear messages as you complete work

The main controller will merge your branch back to main when ready.

### Task Completion Protocol

When you finish a task:
1. Run `/openspec archive` to archive the completed change
2. Notify the main controller:
   ```bash
   agent-team reply-main "<summary of completed work>"
   ```
"#;

const WORKTREE_GITIGNORE: &str = ".gitignore\n.claude/\n.codex/\nopenspec/\n";

pub fn render_role_section(
    prompt: &str,
    worktree: &Path,
    worker_id: &str,
    root: &Path,
) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("role_section.md", ROLE_SECTION_TEMPLATE)
        .context("Failed to add role section template")?;

    let template = env
        .get_template("role_section.md")
        .context("Failed to get role section template")?;

    template
        .render(minijinja::context! {
            prompt => prompt,
            worktree => worktree.display().to_string(),
            branch => branch_name(worker_id),
            root => root.display().to_string(),
        })
        .context("Failed to render role section")
}

/// Base prompt for a worker: the role's `system.md` from the main checkout,
/// falling back to a legacy `prompt.md` inside the worktree.
fn read_role_prompt(
    layout: &TeamLayout,
    worktree: &Path,
    worker_id: &str,
    role: &str,
) -> Result<Option<String>> {
    if let Ok(prompt) = std::fs::read_to_string(layout.role_system_md_path(role)) {
        return Ok(Some(prompt));
    }

    let legacy = worktree
        .join("agents")
        .join("teams")
        .join(worker_id)
        .join("prompt.md");
    match std::fs::read_to_string(&legacy) {
        Ok(prompt) => Ok(Some(prompt)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("read {}", legacy.display())),
    }
}

pub fn build_role_section(
    layout: &TeamLayout,
    worktree: &Path,
    worker_id: &str,
    role: &str,
) -> Result<Option<String>> {
    match read_role_prompt(layout, worktree, worker_id, role)? {
        Some(prompt) => Ok(Some(render_role_section(
            &prompt,
            worktree,
            worker_id,
            layout.root(),
        )?)),
        None => Ok(None),
    }
}

/// Write the role section into the worktree's `CLAUDE.md` and `AGENTS.md`.
/// Returns false when the role has no prompt to inject.
pub fn inject_role_prompt(
    layout: &TeamLayout,
    worktree: &Path,
    worker_id: &str,
    role: &str,
) -> Result<bool> {
    let content = match build_role_section(layout, worktree, worker_id, role)? {
        Some(content) => content,
        None => return Ok(false),
    };

    inject_section(&worktree.join("CLAUDE.md"), SECTION_TAG, &content).context("inject CLAUDE.md")?;
    inject_section(&worktree.join("AGENTS.md"), SECTION_TAG, &content).context("inject AGENTS.md")?;
    Ok(true)
}

pub fn write_worktree_gitignore(worktree: &Path) -> Result<()> {
    let path = worktree.join(".gitignore");
    std::fs::write(&path, WORKTREE_GITIGNORE).with_context(|| format!("write {}", path.display()))
}

/// Starter `prompt.md` for a legacy role.
pub fn default_prompt_md(name: &str) -> String {
    format!(
        r#"# Role: {name}

## Description
Describe this role's responsibilities here.

## Expertise
- List key areas of expertise

## Behavior
- How this role approaches tasks
- Communication style and boundaries

## Workflow

When you receive a `[New Change Assigned]` message:
1. Read the proposal at the specified change path
2. Run `/opsx:continue` to create remaining artifacts (specs, design, tasks)
3. Run `/opsx:apply` to implement tasks
4. Run `/opsx:verify` to validate implementation
5. Commit your work regularly

## Communication Protocol

When you need clarification or have a question for the main controller, run:

```bash
agent-team reply-main "<your question here>"
```

Wait for the main controller to reply. Replies will appear as:
`[Main Controller Reply]`

Do NOT proceed on blocked tasks until you receive a reply.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn render_role_section_fills_environment() {
        let rendered = render_role_section(
            "# System Prompt: dev\n",
            Path::new("/repo/.worktrees/dev-001"),
            "dev-001",
            Path::new("/repo"),
        )
        .unwrap();

        assert!(rendered.starts_with("# System Prompt: dev\n"));
        assert!(rendered.contains("- **Working directory**: `/repo/.worktrees/dev-001`"));
        assert!(rendered.contains("- **Git branch**: `team/dev-001` (your dedicated branch)"));
        assert!(rendered.contains("- **Main project root**: `/repo`"));
        assert!(rendered.contains("agent-team reply-main"));
        assert!(!rendered.contains("{{"), "render_role_section: no placeholders left");
    }

    #[test]
    fn render_role_section_does_not_escape_markup() {
        let rendered = render_role_section(
            "Use <b>care</b> & \"quotes\"",
            Path::new("/w"),
            "x-001",
            Path::new("/r"),
        )
        .unwrap();
        assert!(rendered.contains("Use <b>care</b> & \"quotes\""));
    }

    #[test]
    fn inject_role_prompt_uses_system_md() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();
        let layout = TeamLayout::new(root.clone(), ".worktrees");
        let wt = layout.worktree_path("dev-001");
        std::fs::create_dir_all(&wt).unwrap();
        std::fs::create_dir_all(layout.role_dir("dev")).unwrap();
        std::fs::write(layout.role_system_md_path("dev"), "You are the dev role.\n").unwrap();
        std::fs::write(wt.join("CLAUDE.md"), "# Existing\n").unwrap();

        assert!(inject_role_prompt(&layout, &wt, "dev-001", "dev").unwrap());

        for file in ["CLAUDE.md", "AGENTS.md"] {
            let content = std::fs::read_to_string(wt.join(file)).unwrap();
            assert!(
                content.contains("<!-- AGENT_TEAM:START -->\nYou are the dev role."),
                "inject_role_prompt: {} should contain the system prompt",
                file
            );
            assert!(content.contains("`team/dev-001`"));
        }
        assert!(std::fs::read_to_string(wt.join("CLAUDE.md"))
            .unwrap()
            .ends_with("# Existing\n"));
    }

    #[test]
    fn inject_role_prompt_falls_back_to_legacy_prompt_md() {
        let tmp = TempDir::new().unwrap();
        let layout = TeamLayout::new(tmp.path().to_path_buf(), ".worktrees");
        let wt = layout.worktree_path("qa");
        std::fs::create_dir_all(layout.legacy_teams_dir("qa")).unwrap();
        std::fs::write(
            layout.legacy_teams_dir("qa").join("prompt.md"),
            default_prompt_md("qa"),
        )
        .unwrap();

        assert!(inject_role_prompt(&layout, &wt, "qa", "qa").unwrap());
        let content = std::fs::read_to_string(wt.join("AGENTS.md")).unwrap();
        assert!(content.contains("# Role: qa"));
    }

    #[test]
    fn inject_role_prompt_without_source_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let layout = TeamLayout::new(PathBuf::from(tmp.path()), ".worktrees");
        let wt = layout.worktree_path("ghost-001");
        std::fs::create_dir_all(&wt).unwrap();

        assert!(!inject_role_prompt(&layout, &wt, "ghost-001", "ghost").unwrap());
        assert!(!wt.join("CLAUDE.md").exists());
        assert!(!wt.join("AGENTS.md").exists());
    }

    #[test]
    fn write_worktree_gitignore_lists_local_dirs() {
        let tmp = TempDir::new().unwrap();
        write_worktree_gitignore(tmp.path()).unwrap();

        let content = std::fs::read_to_string(tmp.path().join(".gitignore")).unwrap();
        for expected in [".gitignore", ".claude/", ".codex/", "openspec/"] {
            assert!(content.lines().any(|l| l == expected), "missing {}", expected);
        }
    }

    #[test]
    fn default_prompt_md_mentions_protocol() {
        let prompt = default_prompt_md("designer");
        assert!(prompt.starts_with("# Role: designer\n"));
        assert!(prompt.contains("[New Change Assigned]"));
        assert!(prompt.contains("[Main Controller Reply]"));
    }
}
