use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of the install workflow.
///
/// Unknown skill names are not errors; they end up in
/// [`InstallReport::skipped`](skillsws_types::InstallReport::skipped).
#[derive(Debug, Error)]
pub enum SkillsError {
    #[error("skill catalog unavailable at {}", path.display())]
    CatalogUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot use install target {}", path.display())]
    TargetUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("install directory {} is inside skill directory {}", dest.display(), skill_dir.display())]
    TargetInsideSkill { skill_dir: PathBuf, dest: PathBuf },
    #[error("failed to copy {} to {}", from.display(), to.display())]
    CopyIo {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SkillsError {
    pub(crate) fn copy_io(from: impl Into<PathBuf>, to: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CopyIo {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}
