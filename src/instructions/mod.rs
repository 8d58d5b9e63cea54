mod inject;
mod prompt;

pub use prompt::{default_prompt_md, inject_role_prompt, write_worktree_gitignore};
