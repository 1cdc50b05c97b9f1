//! The install flow: selection in, report out.

use std::path::Path;

use skillsws_types::{InstallReport, SelectionSet, SkillDescriptor};

use crate::catalog::list_skills;
use crate::error::SkillsError;
use crate::install::install_selection;
use crate::report::InstallSink;
use crate::target::TargetResolver;

/// A loaded catalog paired with the resolver for its install target.
#[derive(Debug, Clone)]
pub struct InstallPipeline {
    catalog: Vec<SkillDescriptor>,
    resolver: TargetResolver,
}

impl InstallPipeline {
    pub fn new(catalog: Vec<SkillDescriptor>, resolver: TargetResolver) -> Self {
        Self { catalog, resolver }
    }

    /// Scan `catalog_root` and build a pipeline over it.
    pub fn load(catalog_root: &Path, resolver: TargetResolver) -> Result<Self, SkillsError> {
        Ok(Self::new(list_skills(catalog_root)?, resolver))
    }

    /// Skills in display order.
    pub fn catalog(&self) -> &[SkillDescriptor] {
        &self.catalog
    }

    /// Install `selection`.
    ///
    /// An empty selection is a no-op: the target is not resolved and the
    /// returned report has no target. Otherwise the target is resolved once
    /// before the first copy, so a target failure leaves the disk untouched.
    pub fn execute(
        &self,
        selection: &SelectionSet,
        sink: &mut dyn InstallSink,
    ) -> Result<InstallReport, SkillsError> {
        if selection.is_empty() {
            tracing::debug!("Empty selection, nothing to install");
            return Ok(InstallReport::default());
        }

        let target = self.resolver.resolve()?;
        tracing::debug!(
            target = %target.path().display(),
            origin = ?target.origin(),
            requested = selection.len(),
            "Installing selection"
        );
        sink.target_resolved(&target);
        install_selection(selection, &self.catalog, &target, sink)
    }
}
