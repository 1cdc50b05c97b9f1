//! skillsws-skills: catalog discovery, selection, target resolution and copy.
//!
//! A skill is a directory holding a `SKILL.md` manifest plus any reference
//! or script files. Installing copies the whole directory into the resolved
//! target as `<target>/<name>/`.
//!
//! # Manifest format
//!
//! ```markdown
//! ---
//! name: seo-audit
//! description: "Audit a page for on-page SEO problems"
//! ---
//!
//! # SEO Audit
//!
//! [Instructions for the agent]
//! ```
//!
//! The install flow is a pipeline: gather raw input, resolve it into a
//! [`SelectionSet`](skillsws_types::SelectionSet) with [`selection`], then
//! run it through [`InstallPipeline`]. Nothing in this crate touches the
//! terminal; progress is reported through an [`InstallSink`].

pub mod catalog;
pub mod error;
pub mod frontmatter;
pub mod install;
pub mod pipeline;
pub mod report;
pub mod selection;
pub mod target;

pub use catalog::{find_skill, list_skills};
pub use error::SkillsError;
pub use install::{install_selection, install_skill};
pub use pipeline::InstallPipeline;
pub use report::{InstallSink, NullSink, RecordingSink, SinkEvent};
pub use selection::{resolve_names, resolve_selection};
pub use target::TargetResolver;
