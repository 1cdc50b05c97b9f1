//! Skill catalog discovery.

use std::path::Path;

use skillsws_types::SkillDescriptor;

use crate::error::SkillsError;
use crate::frontmatter::extract_description;

/// Manifest file every skill directory must contain.
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Scan `root` for skills, sorted by name.
///
/// Every immediate subdirectory holding a readable `SKILL.md` is a skill.
/// Anything else (plain files, directories without a manifest, manifests
/// that cannot be read) is left out of the catalog without failing.
///
/// The returned order is the canonical display order that numeric
/// selections index into.
pub fn list_skills(root: &Path) -> Result<Vec<SkillDescriptor>, SkillsError> {
    let entries = std::fs::read_dir(root).map_err(|source| SkillsError::CatalogUnavailable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut skills = Vec::new();
    for entry in entries.flatten() {
        let skill_dir = entry.path();
        if !skill_dir.is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %skill_dir.display(), "skipping skill with non UTF-8 name");
            continue;
        };

        let manifest = skill_dir.join(MANIFEST_FILE);
        if !manifest.is_file() {
            continue;
        }

        let content = match std::fs::read_to_string(&manifest) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %manifest.display(), "Failed to read manifest: {e}");
                continue;
            }
        };

        let source_path = std::path::absolute(&skill_dir).unwrap_or(skill_dir);
        tracing::debug!(skill = %name, "Discovered skill");
        skills.push(SkillDescriptor {
            name,
            description: extract_description(&content),
            source_path,
        });
    }

    skills.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(skills)
}

/// Look up a skill by exact name.
pub fn find_skill<'a>(catalog: &'a [SkillDescriptor], name: &str) -> Option<&'a SkillDescriptor> {
    catalog.iter().find(|s| s.name == name)
}
