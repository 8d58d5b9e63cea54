use chrono::{DateTime, Local};

pub const CHANGE_SLUG_MAX_LEN: usize = 50;
const DEFAULT_PROVIDER: &str = "claude";

/// Lower-case `input`, turning every run of characters outside `[a-z0-9]`
/// into a single `-`. Falls back to `task` when nothing usable remains.
pub fn slugify(input: &str, max_len: usize) -> String {
    let lowered = input.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_gap = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }

    // Only ASCII remains, so byte truncation is safe.
    let mut slug = slug.trim_matches('-').to_string();
    slug.truncate(max_len);

    if slug.is_empty() {
        "task".to_string()
    } else {
        slug
    }
}

fn provider_command(provider: &str) -> Option<&'static str> {
    match provider {
        "claude" => Some("claude --dangerously-skip-permissions"),
        "codex" => Some("codex --dangerously-bypass-approvals-and-sandbox"),
        "opencode" => Some("opencode"),
        _ => None,
    }
}

/// Shell command that starts the AI CLI for `provider`. Unknown providers
/// launch claude.
pub fn build_launch_cmd(provider: &str, model: &str) -> String {
    let base = provider_command(provider)
        .or_else(|| provider_command(DEFAULT_PROVIDER))
        .unwrap_or(DEFAULT_PROVIDER);

    if model.is_empty() {
        base.to_string()
    } else {
        format!("{} --model {}", base, model)
    }
}

pub fn change_name_at(desc: &str, at: DateTime<Local>) -> String {
    format!(
        "{}-{}",
        at.format("%Y-%m-%d-%H-%M-%S"),
        slugify(desc, CHANGE_SLUG_MAX_LEN)
    )
}

pub fn change_name(desc: &str) -> String {
    change_name_at(desc, Local::now())
}

pub fn change_notice(desc: &str, change_name: &str) -> String {
    format!(
        "[New Change Assigned] {}\nChange: openspec/changes/{}/\nProposal ready. Run /opsx:continue to proceed.",
        desc, change_name
    )
}
