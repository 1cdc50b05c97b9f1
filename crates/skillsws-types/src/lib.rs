use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ──────────────────── Catalog Types ────────────────────

/// One installable skill discovered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// Skill name, identical to its directory name under the catalog root.
    pub name: String,
    /// Short summary taken from the manifest's `description:` line.
    #[serde(default)]
    pub description: String,
    /// Absolute path of the skill directory inside the catalog.
    pub source_path: PathBuf,
}

// ──────────────────── Target Types ────────────────────

/// How the install target was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOrigin {
    /// A candidate directory that already existed on disk.
    Existing,
    /// A directory created by the resolver (fallback or explicit override).
    Created,
}

/// The resolved destination root for installed skills.
///
/// Fixed for the remainder of a run once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallTarget {
    path: PathBuf,
    origin: TargetOrigin,
}

impl InstallTarget {
    pub fn new(path: PathBuf, origin: TargetOrigin) -> Self {
        Self { path, origin }
    }

    /// Root directory skills are copied into.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> TargetOrigin {
        self.origin
    }

    /// Destination directory for a single skill (`<target>/<name>`).
    pub fn skill_dir(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

// ──────────────────── Selection Types ────────────────────

/// Skill names the user asked to install, in request order.
///
/// Duplicates and names unknown to the catalog are kept as-is; the copy
/// stage decides what is installed and what is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(Vec<String>);

impl SelectionSet {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<String> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ──────────────────── Report Types ────────────────────

/// Outcome of a batch install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    /// Target root, `None` when nothing was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    /// Names copied into the target, in request order.
    #[serde(default)]
    pub installed: Vec<String>,
    /// Requested names missing from the catalog, in request order.
    #[serde(default)]
    pub skipped: Vec<String>,
    /// Total number of files written across all installed skills.
    #[serde(default)]
    pub files_copied: usize,
}

impl InstallReport {
    pub fn installed_count(&self) -> usize {
        self.installed.len()
    }

    /// True when the selection was empty and no target was touched.
    pub fn is_noop(&self) -> bool {
        self.target.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_descriptor_serde() {
        let skill = SkillDescriptor {
            name: "seo-audit".into(),
            description: "Audit a page for SEO issues".into(),
            source_path: PathBuf::from("/catalog/seo-audit"),
        };
        let json = serde_json::to_string(&skill).unwrap();
        let parsed: SkillDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, skill);
    }

    #[test]
    fn test_skill_descriptor_missing_description_defaults() {
        let json = r#"{"name":"x","source_path":"/c/x"}"#;
        let parsed: SkillDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.description, "");
    }

    #[test]
    fn test_install_target_skill_dir() {
        let target = InstallTarget::new(PathBuf::from("/home/u/.claude/skills"), TargetOrigin::Existing);
        assert_eq!(
            target.skill_dir("copywriting"),
            PathBuf::from("/home/u/.claude/skills/copywriting")
        );
        assert_eq!(target.origin(), TargetOrigin::Existing);
    }

    #[test]
    fn test_selection_set_keeps_order_and_duplicates() {
        let set: SelectionSet = ["b", "x", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.names(), &["b", "x", "b"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["b","x","b"]"#);
    }

    #[test]
    fn test_target_origin_serde() {
        let json = serde_json::to_string(&TargetOrigin::Created).unwrap();
        assert_eq!(json, "\"created\"");
    }

    #[test]
    fn test_install_report_noop() {
        let report = InstallReport::default();
        assert!(report.is_noop());
        assert_eq!(report.installed_count(), 0);

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("target"));
    }
}
