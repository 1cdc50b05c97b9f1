//! Progress reporting seam between the install workflow and its presenter.

use std::path::PathBuf;

use skillsws_types::InstallTarget;

/// Receives install progress as it happens.
///
/// All methods default to doing nothing so presenters only implement what
/// they render.
pub trait InstallSink {
    /// The target was resolved; called once, before any copy.
    fn target_resolved(&mut self, _target: &InstallTarget) {}

    /// A requested name is not in the catalog and was skipped.
    fn skill_skipped(&mut self, _name: &str) {}

    /// The skill's destination is its own catalog directory; nothing was copied.
    fn skill_in_place(&mut self, _name: &str) {}

    /// A skill finished copying.
    fn skill_installed(&mut self, _name: &str, _files: usize) {}
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl InstallSink for NullSink {}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    TargetResolved(PathBuf),
    Skipped(String),
    InPlace(String),
    Installed { name: String, files: usize },
}

/// Sink that keeps every event in order, for headless callers and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl InstallSink for RecordingSink {
    fn target_resolved(&mut self, target: &InstallTarget) {
        self.events
            .push(SinkEvent::TargetResolved(target.path().to_path_buf()));
    }

    fn skill_skipped(&mut self, name: &str) {
        self.events.push(SinkEvent::Skipped(name.to_string()));
    }

    fn skill_in_place(&mut self, name: &str) {
        self.events.push(SinkEvent::InPlace(name.to_string()));
    }

    fn skill_installed(&mut self, name: &str, files: usize) {
        self.events.push(SinkEvent::Installed {
            name: name.to_string(),
            files,
        });
    }
}
