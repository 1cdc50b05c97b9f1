//! Turning user input into a [`SelectionSet`].

use skillsws_types::{SelectionSet, SkillDescriptor};

/// Token that selects the whole catalog when given on its own.
pub const ALL_TOKEN: &str = "all";

/// Resolve a raw comma-separated answer from the interactive prompt.
///
/// Each token is trimmed; empty tokens are dropped. A token that parses as
/// an integer in `1..=catalog.len()` selects the skill at that position in
/// display order, any other token is kept verbatim as a skill name. A sole
/// `all` token (any case) selects every skill.
pub fn resolve_selection(raw: &str, catalog: &[SkillDescriptor]) -> SelectionSet {
    if is_all(raw) {
        return all_names(catalog);
    }

    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| resolve_token(token, catalog))
        .collect()
}

/// Resolve names passed on the command line, without index lookup.
///
/// `install all` expands to the whole catalog; everything else is taken as
/// a literal skill name.
pub fn resolve_names<S: AsRef<str>>(names: &[S], catalog: &[SkillDescriptor]) -> SelectionSet {
    if let [only] = names {
        if is_all(only.as_ref()) {
            return all_names(catalog);
        }
    }

    names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_all(token: &str) -> bool {
    token.trim().eq_ignore_ascii_case(ALL_TOKEN)
}

fn all_names(catalog: &[SkillDescriptor]) -> SelectionSet {
    catalog.iter().map(|s| s.name.clone()).collect()
}

fn resolve_token(token: &str, catalog: &[SkillDescriptor]) -> String {
    match token.parse::<usize>() {
        Ok(n) if (1..=catalog.len()).contains(&n) => catalog[n - 1].name.clone(),
        _ => token.to_string(),
    }
}
