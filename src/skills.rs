use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::team::TeamLayout;

#[derive(Debug, Default, Deserialize)]
struct RoleYaml {
    #[serde(default)]
    skills: Vec<String>,
}

/// Dependency skills listed in a role's `references/role.yaml`. A role
/// without the file has no dependencies.
pub fn read_role_skills(layout: &TeamLayout, role: &str) -> Result<Vec<String>> {
    let path = layout.role_yaml_path(role);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).context("read role.yaml"),
    };
    let parsed: RoleYaml = serde_yaml::from_str(&content).context("parse role.yaml")?;
    Ok(parsed.skills)
}

/// `owner/repo@name` → `name`; plain names pass through.
pub fn parse_skill_name(skill: &str) -> &str {
    match skill.rfind('@') {
        Some(idx) => &skill[idx + 1..],
        None => skill,
    }
}

/// Recursively copy `src` to `dst`, replacing whatever was at `dst`.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        std::fs::remove_dir_all(dst).with_context(|| format!("remove {}", dst.display()))?;
    }
    copy_tree(src, dst)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst).with_context(|| format!("create {}", dst.display()))?;

    for entry in std::fs::read_dir(src).with_context(|| format!("read {}", src.display()))? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SkillCopyReport {
    pub copied: Vec<String>,
    pub missing: Vec<String>,
}

/// Locates skills in the project (`agents/teams/`, `skills/`) and in the
/// user's global `~/.claude/skills/`.
#[derive(Debug, Clone)]
pub struct SkillResolver {
    layout: TeamLayout,
    global_dir: Option<PathBuf>,
}

impl SkillResolver {
    pub fn new(layout: TeamLayout) -> Self {
        let global_dir = dirs::home_dir().map(|home| home.join(".claude").join("skills"));
        Self { layout, global_dir }
    }

    #[cfg(test)]
    pub fn with_global_dir(mut self, global_dir: Option<PathBuf>) -> Self {
        self.global_dir = global_dir;
        self
    }

    pub fn global_skill_dir(&self, name: &str) -> Option<PathBuf> {
        self.global_dir.as_ref().map(|dir| dir.join(name))
    }

    /// Full name first, then the short name after `@`.
    pub fn find(&self, skill: &str) -> Option<PathBuf> {
        let short = parse_skill_name(skill);
        let mut candidates = vec![skill];
        if short != skill {
            candidates.push(short);
        }

        candidates.into_iter().find_map(|name| {
            [
                Some(self.layout.teams_dir().join(name)),
                Some(self.layout.root().join("skills").join(name)),
                self.global_skill_dir(name),
            ]
            .into_iter()
            .flatten()
            .find(|path| path.exists())
        })
    }

    /// Copy the role skill and its dependencies into the worktree's
    /// `.claude/skills/` and `.codex/skills/`.
    pub fn copy_to_worktree(&self, worktree: &Path, role: &str) -> Result<SkillCopyReport> {
        let mut report = SkillCopyReport::default();
        let mut sources: Vec<(String, PathBuf)> = Vec::new();

        let role_dir = self.layout.role_dir(role);
        if role_dir.exists() {
            sources.push((role.to_string(), role_dir));
        }

        for skill in read_role_skills(&self.layout, role)? {
            match self.find(&skill) {
                Some(path) => sources.push((parse_skill_name(&skill).to_string(), path)),
                None => report.missing.push(skill),
            }
        }

        for base in [
            worktree.join(".claude").join("skills"),
            worktree.join(".codex").join("skills"),
        ] {
            for (name, src) in &sources {
                let dst = base.join(name);
                copy_dir(src, &dst)
                    .with_context(|| format!("copy skill {} to {}", name, dst.display()))?;
            }
        }

        report.copied = sources.into_iter().map(|(name, _)| name).collect();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TeamLayout, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("repo");
        let global = tmp.path().join("home/.claude/skills");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&global).unwrap();
        (tmp, TeamLayout::new(root, ".worktrees"), global)
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn parse_skill_name_variants() {
        assert_eq!(parse_skill_name("vite"), "vite");
        assert_eq!(parse_skill_name("antfu/skills@vite"), "vite");
        assert_eq!(parse_skill_name("a@b@c"), "c");
        assert_eq!(parse_skill_name("trailing@"), "");
    }

    #[test]
    fn read_role_skills_missing_file_is_empty() {
        let (_tmp, layout, _) = setup();
        assert!(read_role_skills(&layout, "dev").unwrap().is_empty());
    }

    #[test]
    fn read_role_skills_parses_list() {
        let (_tmp, layout, _) = setup();
        write(
            &layout.role_yaml_path("dev"),
            "name: dev\nskills:\n  - vite\n  - \"antfu/skills@vitest\"\n",
        );
        assert_eq!(
            read_role_skills(&layout, "dev").unwrap(),
            vec!["vite".to_string(), "antfu/skills@vitest".to_string()]
        );
    }

    #[test]
    fn read_role_skills_rejects_invalid_yaml() {
        let (_tmp, layout, _) = setup();
        write(&layout.role_yaml_path("dev"), "skills: [unclosed");
        assert!(read_role_skills(&layout, "dev").is_err());
    }

    #[test]
    fn find_searches_project_then_global() {
        let (_tmp, layout, global) = setup();
        let resolver = SkillResolver::new(layout.clone()).with_global_dir(Some(global.clone()));

        std::fs::create_dir_all(global.join("lint")).unwrap();
        assert_eq!(resolver.find("lint"), Some(global.join("lint")));

        std::fs::create_dir_all(layout.root().join("skills/lint")).unwrap();
        assert_eq!(
            resolver.find("lint"),
            Some(layout.root().join("skills/lint")),
            "find: project skills/ should win over global"
        );

        std::fs::create_dir_all(layout.role_dir("lint")).unwrap();
        assert_eq!(resolver.find("lint"), Some(layout.role_dir("lint")));

        assert_eq!(resolver.find("absent"), None);
    }

    #[test]
    fn find_falls_back_to_short_name() {
        let (_tmp, layout, _) = setup();
        let resolver = SkillResolver::new(layout.clone()).with_global_dir(None);
        std::fs::create_dir_all(layout.root().join("skills/vitest")).unwrap();

        assert_eq!(
            resolver.find("antfu/skills@vitest"),
            Some(layout.root().join("skills/vitest"))
        );
    }

    #[test]
    fn copy_to_worktree_copies_role_and_dependencies() {
        let (_tmp, layout, global) = setup();
        write(&layout.role_dir("dev-role").join("SKILL.md"), "# dev-role\n");
        write(&layout.role_system_md_path("dev-role"), "system\n");
        write(
            &layout.role_yaml_path("dev-role"),
            "skills:\n  - vite-tool\n  - \"antfu/skills@vitest\"\n  - ghost\n",
        );
        write(&layout.root().join("skills/vite-tool/SKILL.md"), "# vite\n");
        write(&layout.root().join("skills/vite-tool/nested/config.json"), "{}");
        write(&global.join("vitest/SKILL.md"), "# vitest\n");

        let wt = layout.worktree_path("dev-role-001");
        std::fs::create_dir_all(&wt).unwrap();

        let report = SkillResolver::new(layout.clone())
            .with_global_dir(Some(global))
            .copy_to_worktree(&wt, "dev-role")
            .unwrap();

        assert_eq!(report.copied, vec!["dev-role", "vite-tool", "vitest"]);
        assert_eq!(report.missing, vec!["ghost"]);

        for base in [".claude/skills", ".codex/skills"] {
            let base = wt.join(base);
            assert!(base.join("dev-role/SKILL.md").exists());
            assert!(base.join("dev-role/references/role.yaml").exists());
            assert!(base.join("vite-tool/nested/config.json").exists());
            assert!(base.join("vitest/SKILL.md").exists());
        }
    }

    #[test]
    fn copy_to_worktree_replaces_stale_copies() {
        let (_tmp, layout, _) = setup();
        write(&layout.role_dir("dev").join("SKILL.md"), "fresh\n");
        let wt = layout.worktree_path("dev-001");
        write(&wt.join(".claude/skills/dev/stale.md"), "old\n");

        SkillResolver::new(layout.clone())
            .with_global_dir(None)
            .copy_to_worktree(&wt, "dev")
            .unwrap();

        assert!(!wt.join(".claude/skills/dev/stale.md").exists());
        assert_eq!(
            std::fs::read_to_string(wt.join(".claude/skills/dev/SKILL.md")).unwrap(),
            "fresh\n"
        );
    }
}
