//! Install target resolution.

use std::path::{Path, PathBuf};

use skillsws_types::{InstallTarget, TargetOrigin};

use crate::error::SkillsError;

/// Picks the directory skills are installed into.
///
/// Candidates are checked in order and the first existing directory wins.
/// When none exists the fallback is created (with missing parents) and
/// returned. The resolver never reads the environment; callers pass the
/// working and home directories in.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    candidates: Vec<PathBuf>,
    fallback: PathBuf,
}

impl TargetResolver {
    pub fn new(candidates: Vec<PathBuf>, fallback: PathBuf) -> Self {
        Self {
            candidates,
            fallback,
        }
    }

    /// Resolver over the known agent conventions.
    ///
    /// Search order (first existing wins):
    /// 1. `<cwd>/.claude/skills`
    /// 2. `<cwd>/skills`
    /// 3. `<home>/openclaw/skills`
    /// 4. `<home>/.claude/skills`
    ///
    /// Fallback: `<home>/.claude/skills`.
    pub fn with_defaults(cwd: &Path, home: &Path) -> Self {
        Self::new(default_candidates(cwd, home), default_fallback(home))
    }

    /// Resolver that always uses `path`, creating it if needed.
    pub fn explicit(path: PathBuf) -> Self {
        Self::new(Vec::new(), path)
    }

    /// Resolve the target. The returned path exists as a directory.
    pub fn resolve(&self) -> Result<InstallTarget, SkillsError> {
        if let Some(found) = self.candidates.iter().find(|c| c.is_dir()) {
            tracing::info!(target = %found.display(), "Using existing install target");
            return Ok(InstallTarget::new(found.clone(), TargetOrigin::Existing));
        }

        if self.fallback.is_dir() {
            tracing::info!(target = %self.fallback.display(), "Using existing install target");
            return Ok(InstallTarget::new(self.fallback.clone(), TargetOrigin::Existing));
        }

        std::fs::create_dir_all(&self.fallback).map_err(|source| SkillsError::TargetUnwritable {
            path: self.fallback.clone(),
            source,
        })?;
        tracing::info!(target = %self.fallback.display(), "Created install target");
        Ok(InstallTarget::new(self.fallback.clone(), TargetOrigin::Created))
    }
}

/// Candidate install directories in search order.
pub fn default_candidates(cwd: &Path, home: &Path) -> Vec<PathBuf> {
    vec![
        cwd.join(".claude").join("skills"),
        cwd.join("skills"),
        home.join("openclaw").join("skills"),
        home.join(".claude").join("skills"),
    ]
}

/// Directory created when no candidate exists.
pub fn default_fallback(home: &Path) -> PathBuf {
    home.join(".claude").join("skills")
}
