//! Copying skill directories into the install target.

use std::path::{Path, PathBuf};

use skillsws_types::{InstallReport, InstallTarget, SelectionSet, SkillDescriptor};

use crate::catalog::find_skill;
use crate::error::SkillsError;
use crate::report::InstallSink;

/// Copy one skill into `<target>/<name>`, returning the number of files written.
///
/// Existing files at the same relative path are overwritten; files already
/// in the destination that the source lacks are left alone. A failure part
/// way through leaves the files copied so far in place. When the
/// destination already is the skill's source directory nothing is copied
/// and 0 is returned.
pub fn install_skill(skill: &SkillDescriptor, target: &InstallTarget) -> Result<usize, SkillsError> {
    let dest = target.skill_dir(&skill.name);
    if is_in_place(skill, target)? {
        return Ok(0);
    }
    let files = copy_dir_all(&skill.source_path, &dest)?;
    tracing::debug!(skill = %skill.name, files, dest = %dest.display(), "Copied skill");
    Ok(files)
}

/// Install every name in `selection`, in request order.
///
/// Names missing from `catalog` are reported as skipped and the batch
/// continues. The first copy failure aborts the batch.
pub fn install_selection(
    selection: &SelectionSet,
    catalog: &[SkillDescriptor],
    target: &InstallTarget,
    sink: &mut dyn InstallSink,
) -> Result<InstallReport, SkillsError> {
    let mut report = InstallReport {
        target: Some(target.path().to_path_buf()),
        ..Default::default()
    };

    for name in selection {
        let Some(skill) = find_skill(catalog, name) else {
            tracing::debug!(skill = %name, "Requested skill not in catalog");
            sink.skill_skipped(name);
            report.skipped.push(name.clone());
            continue;
        };

        if is_in_place(skill, target)? {
            tracing::info!(skill = %name, "Skill already in place, not copying onto itself");
            sink.skill_in_place(name);
            report.installed.push(name.clone());
            continue;
        }

        let files = install_skill(skill, target)?;
        sink.skill_installed(name, files);
        report.installed.push(name.clone());
        report.files_copied += files;
    }

    tracing::info!(
        installed = report.installed.len(),
        skipped = report.skipped.len(),
        "Install batch finished"
    );
    Ok(report)
}

/// Whether `<target>/<name>` resolves to the skill's own source directory.
///
/// Copying a directory onto itself would truncate every file, so callers
/// must skip the copy when this returns `true`. A destination nested inside
/// the source would recurse forever and is rejected.
pub fn is_in_place(skill: &SkillDescriptor, target: &InstallTarget) -> Result<bool, SkillsError> {
    let dest = target.skill_dir(&skill.name);
    let src = std::fs::canonicalize(&skill.source_path)
        .map_err(|e| SkillsError::copy_io(&skill.source_path, &dest, e))?;
    let dest = canonical_dest(target.path(), &skill.name).unwrap_or(dest);

    if dest == src {
        return Ok(true);
    }
    if dest.starts_with(&src) {
        return Err(SkillsError::TargetInsideSkill {
            skill_dir: src,
            dest,
        });
    }
    Ok(false)
}

/// Canonical `<root>/<name>`, following a symlinked `name` when it exists.
fn canonical_dest(root: &Path, name: &str) -> Option<PathBuf> {
    let dest = root.join(name);
    std::fs::canonicalize(&dest)
        .or_else(|_| std::fs::canonicalize(root).map(|r| r.join(name)))
        .ok()
}

/// Recursively copy `src` into `dest`, creating directories as needed.
///
/// Symbolic links in the source are followed.
fn copy_dir_all(src: &Path, dest: &Path) -> Result<usize, SkillsError> {
    std::fs::create_dir_all(dest).map_err(|e| SkillsError::copy_io(src, dest, e))?;

    let entries = std::fs::read_dir(src).map_err(|e| SkillsError::copy_io(src, dest, e))?;
    let mut files = 0;
    for entry in entries {
        let entry = entry.map_err(|e| SkillsError::copy_io(src, dest, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        if from.is_dir() {
            files += copy_dir_all(&from, &to)?;
        } else {
            tracing::debug!(from = %from.display(), to = %to.display(), "Copying file");
            std::fs::copy(&from, &to).map_err(|e| SkillsError::copy_io(&from, &to, e))?;
            files += 1;
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{NullSink, RecordingSink, SinkEvent};
    use skillsws_types::TargetOrigin;
    use std::fs;

    fn make_skill(root: &Path, name: &str) -> SkillDescriptor {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("references").join("deep")).unwrap();
        fs::create_dir_all(dir.join("scripts")).unwrap();
        fs::write(dir.join("SKILL.md"), format!("---\ndescription: {name}\n---\n")).unwrap();
        fs::write(dir.join("references").join("guide.md"), "# Guide\n").unwrap();
        fs::write(dir.join("references").join("deep").join("data.bin"), [0u8, 159, 146, 150]).unwrap();
        fs::write(dir.join("scripts").join("run.sh"), "#!/bin/sh\necho hi\n").unwrap();
        SkillDescriptor {
            name: name.to_string(),
            description: name.to_string(),
            source_path: dir,
        }
    }

    fn target_in(root: &Path) -> InstallTarget {
        let path = root.join("target");
        fs::create_dir_all(&path).unwrap();
        InstallTarget::new(path, TargetOrigin::Existing)
    }

    fn relative_files(root: &Path) -> Vec<PathBuf> {
        let mut out = Vec::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    out.push(path.strip_prefix(root).unwrap().to_path_buf());
                }
            }
        }
        out.sort();
        out
    }

    #[test]
    fn test_install_skill_copies_tree() {
        let dir = tempfile::tempdir().unwrap();
        let skill = make_skill(&dir.path().join("catalog"), "seo-audit");
        let target = target_in(dir.path());

        let files = install_skill(&skill, &target).unwrap();
        assert_eq!(files, 4);

        let dest = target.skill_dir("seo-audit");
        assert_eq!(relative_files(&skill.source_path), relative_files(&dest));
        for rel in relative_files(&skill.source_path) {
            assert_eq!(
                fs::read(skill.source_path.join(&rel)).unwrap(),
                fs::read(dest.join(&rel)).unwrap(),
                "content differs for {}",
                rel.display()
            );
        }
    }

    #[test]
    fn test_install_skill_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let skill = make_skill(&dir.path().join("catalog"), "copywriting");
        let target = target_in(dir.path());

        install_skill(&skill, &target).unwrap();
        let first = relative_files(&target.skill_dir("copywriting"));
        install_skill(&skill, &target).unwrap();
        let second = relative_files(&target.skill_dir("copywriting"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_install_skill_overwrites_changed_file() {
        let dir = tempfile::tempdir().unwrap();
        let skill = make_skill(&dir.path().join("catalog"), "copywriting");
        let target = target_in(dir.path());
        let dest = target.skill_dir("copywriting");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("SKILL.md"), "stale").unwrap();
        fs::write(dest.join("local-notes.md"), "keep me").unwrap();

        install_skill(&skill, &target).unwrap();
        assert_eq!(
            fs::read_to_string(dest.join("SKILL.md")).unwrap(),
            "---\ndescription: copywriting\n---\n"
        );
        assert_eq!(fs::read_to_string(dest.join("local-notes.md")).unwrap(), "keep me");
    }

    #[test]
    fn test_install_selection_skips_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_root = dir.path().join("catalog");
        let catalog = vec![make_skill(&catalog_root, "a"), make_skill(&catalog_root, "b")];
        let target = target_in(dir.path());
        let selection = SelectionSet::new(vec!["b".into(), "ghost".into(), "a".into()]);

        let mut sink = RecordingSink::default();
        let report = install_selection(&selection, &catalog, &target, &mut sink).unwrap();

        assert_eq!(report.installed, vec!["b", "a"]);
        assert_eq!(report.skipped, vec!["ghost"]);
        assert_eq!(report.files_copied, 8);
        assert_eq!(report.target.as_deref(), Some(target.path()));
        assert_eq!(
            sink.events,
            vec![
                SinkEvent::Installed { name: "b".into(), files: 4 },
                SinkEvent::Skipped("ghost".into()),
                SinkEvent::Installed { name: "a".into(), files: 4 },
            ]
        );
    }

    #[test]
    fn test_install_selection_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = vec![make_skill(&dir.path().join("catalog"), "a")];
        let target = target_in(dir.path());
        let selection = SelectionSet::new(vec!["a".into(), "a".into()]);

        let report = install_selection(&selection, &catalog, &target, &mut NullSink).unwrap();
        assert_eq!(report.installed_count(), 2);
        assert_eq!(relative_files(&target.skill_dir("a")).len(), 4);
    }

    #[test]
    fn test_install_selection_copy_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_root = dir.path().join("catalog");
        let mut broken = make_skill(&catalog_root, "broken");
        broken.source_path = catalog_root.join("vanished");
        let catalog = vec![broken, make_skill(&catalog_root, "fine")];
        let target = target_in(dir.path());
        let selection = SelectionSet::new(vec!["broken".into(), "fine".into()]);

        let mut sink = RecordingSink::default();
        let err = install_selection(&selection, &catalog, &target, &mut sink).unwrap_err();
        assert!(matches!(err, SkillsError::CopyIo { .. }));
        assert!(sink.events.is_empty());
        assert!(!target.skill_dir("fine").exists());
    }

    #[test]
    fn test_install_onto_own_catalog_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_root = dir.path().join("skills");
        let skill = make_skill(&catalog_root, "seo");
        let before = fs::read(skill.source_path.join("SKILL.md")).unwrap();
        let target = InstallTarget::new(catalog_root.clone(), TargetOrigin::Existing);

        assert!(is_in_place(&skill, &target).unwrap());
        assert_eq!(install_skill(&skill, &target).unwrap(), 0);

        let mut sink = RecordingSink::default();
        let selection = SelectionSet::new(vec!["seo".into()]);
        let report = install_selection(&selection, std::slice::from_ref(&skill), &target, &mut sink).unwrap();

        assert_eq!(report.installed, vec!["seo"]);
        assert_eq!(report.files_copied, 0);
        assert_eq!(sink.events, vec![SinkEvent::InPlace("seo".into())]);
        assert_eq!(fs::read(skill.source_path.join("SKILL.md")).unwrap(), before);
        assert_eq!(
            fs::read_to_string(skill.source_path.join("scripts").join("run.sh")).unwrap(),
            "#!/bin/sh\necho hi\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_install_into_own_catalog_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_root = dir.path().join("skills");
        let skill = make_skill(&catalog_root, "seo");
        let link = dir.path().join("linked");
        std::os::unix::fs::symlink(&catalog_root, &link).unwrap();

        let target = InstallTarget::new(link, TargetOrigin::Existing);
        assert!(is_in_place(&skill, &target).unwrap());
        assert_eq!(install_skill(&skill, &target).unwrap(), 0);
        assert!(fs::metadata(skill.source_path.join("SKILL.md")).unwrap().len() > 0);
    }

    #[test]
    fn test_target_inside_skill_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let skill = make_skill(&dir.path().join("catalog"), "seo");
        let nested = skill.source_path.join("references");
        let target = InstallTarget::new(nested.join("deep"), TargetOrigin::Existing);
        let nested_skill = SkillDescriptor {
            name: "deep".into(),
            ..skill.clone()
        };

        let err = install_skill(&nested_skill, &target).unwrap_err();
        assert!(matches!(err, SkillsError::TargetInsideSkill { .. }));
        assert_eq!(
            fs::read(skill.source_path.join("references").join("deep").join("data.bin")).unwrap(),
            vec![0u8, 159, 146, 150]
        );
    }
}
