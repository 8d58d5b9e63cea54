use super::TeamLayout;

fn sorted_dir_names(dir: &std::path::Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Roles defined in `agents/teams/`: directories that carry a `SKILL.md`.
pub fn list_available_roles(layout: &TeamLayout) -> Vec<String> {
    let teams_dir = layout.teams_dir();
    sorted_dir_names(&teams_dir)
        .into_iter()
        .filter(|name| teams_dir.join(name).join("SKILL.md").is_file())
        .collect()
}

/// Legacy roles: worktrees whose own `agents/teams/<name>/config.yaml` exists.
pub fn list_legacy_roles(layout: &TeamLayout) -> Vec<String> {
    sorted_dir_names(&layout.root().join(layout.wt_base()))
        .into_iter()
        .filter(|name| layout.legacy_config_path(name).is_file())
        .collect()
}
