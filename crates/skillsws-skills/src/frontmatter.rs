//! Line-oriented frontmatter reading for `SKILL.md` manifests.

use once_cell::sync::Lazy;
use regex::Regex;

/// `description:` at the start of a line, value optionally wrapped in quotes.
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^description:[ \t]*["']?(.+?)["']?[ \t]*\r?$"#)
        .expect("description pattern is valid")
});

/// Return the frontmatter block between leading `---` fences, if any.
pub fn split_frontmatter(content: &str) -> Option<&str> {
    let trimmed = content.trim_start();
    let after_first = trimmed.strip_prefix("---")?;

    // Find the closing ---
    let end_pos = after_first.find("\n---")?;
    Some(&after_first[..end_pos])
}

/// Extract the `description` value from a manifest.
///
/// The search is limited to the fenced frontmatter when the manifest has
/// one; otherwise every line is considered. Returns an empty string when
/// no `description:` line matches.
pub fn extract_description(content: &str) -> String {
    let haystack = split_frontmatter(content).unwrap_or(content);
    DESCRIPTION_RE
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
