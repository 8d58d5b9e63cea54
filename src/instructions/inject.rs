use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

fn markers(tag: &str) -> (String, String) {
    (
        format!("<!-- {}:START -->", tag),
        format!("<!-- {}:END -->", tag),
    )
}

/// Splice `content` into `existing` between the `tag` markers.
///
/// An existing marked section is replaced in place; otherwise the section is
/// prepended, leaving the rest of the document untouched.
pub fn splice_section(existing: &str, tag: &str, content: &str) -> Result<String> {
    let (start, end) = markers(tag);
    let section = format!("{}\n{}\n{}", start, content, end);

    let pattern = format!("(?s){}.*?{}", regex::escape(&start), regex::escape(&end));
    let re = Regex::new(&pattern).context("build section pattern")?;

    if re.is_match(existing) {
        Ok(re.replace_all(existing, regex::NoExpand(&section)).into_owned())
    } else {
        Ok(format!("{}\n\n{}", section, existing))
    }
}

pub fn inject_section(file_path: &Path, tag: &str, content: &str) -> Result<()> {
    let existing = match std::fs::read_to_string(file_path) {
        Ok(existing) => existing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let (start, end) = markers(tag);
            let fresh = format!("{}\n{}\n{}\n", start, content, end);
            return std::fs::write(file_path, fresh)
                .with_context(|| format!("write {}", file_path.display()));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("read {}", file_path.display()));
        }
    };

    let updated = splice_section(&existing, tag, content)?;
    std::fs::write(file_path, updated).with_context(|| format!("write {}", file_path.display()))
}
