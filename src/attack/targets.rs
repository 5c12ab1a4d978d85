// SPDX-License-Identifier: PMPL-1.0-or-later

//! Target enumeration: which entries in the target directory become victims.

use crate::config::EmulatorConfig;
use crate::error::{Result, SimError};
use crate::types::{SkipReason, SkippedEntry, TargetPlan, Victim};
use log::debug;
use std::fs::{self, DirEntry, FileType};
use std::io;
use std::path::Path;

/// Stand-in name for a directory entry whose name could not be read.
const UNREADABLE_ENTRY: &str = "<unreadable>";

/// List eligible victims without touching anything.
///
/// Filters apply in order: regular files only (symlinks are not followed),
/// then names already carrying the marker, then protected names.
pub fn enumerate(config: &EmulatorConfig) -> Result<TargetPlan> {
    let dir = &config.target_dir;
    if !dir.is_dir() {
        return Err(SimError::TargetNotFound(dir.clone()));
    }

    let mut victims = Vec::new();
    let mut skipped = Vec::new();

    for entry in fs::read_dir(dir)? {
        match sort_entry(entry, config) {
            Ok(victim) => victims.push(victim),
            Err(entry) => {
                debug!("skipping {} ({})", entry.name, entry.reason);
                skipped.push(entry);
            }
        }
    }

    victims.sort_by(|a, b| a.name.cmp(&b.name));
    skipped.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(TargetPlan {
        target_dir: dir.clone(),
        victims,
        skipped,
    })
}

/// An entry that cannot be read is skipped, never fatal to the run.
fn sort_entry(
    entry: io::Result<DirEntry>,
    config: &EmulatorConfig,
) -> std::result::Result<Victim, SkippedEntry> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            debug!("cannot read directory entry: {}", e);
            return Err(SkippedEntry {
                name: UNREADABLE_ENTRY.to_string(),
                reason: SkipReason::Unreadable,
            });
        }
    };
    let name = entry.file_name().to_string_lossy().to_string();

    let reason = match entry.file_type() {
        Ok(file_type) => classify(&file_type, &name, config),
        Err(e) => {
            debug!("cannot stat {}: {}", name, e);
            Some(SkipReason::Unreadable)
        }
    };

    match reason {
        Some(reason) => Err(SkippedEntry { name, reason }),
        None => Ok(Victim {
            name,
            path: entry.path(),
        }),
    }
}

fn classify(file_type: &FileType, name: &str, config: &EmulatorConfig) -> Option<SkipReason> {
    if let Some(reason) = non_regular_reason(file_type) {
        return Some(reason);
    }
    if name.ends_with(&config.marker_extension) {
        return Some(SkipReason::AlreadyMarked);
    }
    if config.is_protected(name) {
        return Some(SkipReason::Protected);
    }
    None
}

fn non_regular_reason(file_type: &FileType) -> Option<SkipReason> {
    if file_type.is_symlink() {
        Some(SkipReason::Symlink)
    } else if file_type.is_dir() {
        Some(SkipReason::Directory)
    } else if !file_type.is_file() {
        Some(SkipReason::SpecialFile)
    } else {
        None
    }
}

/// Whether `path` is still a regular file right before processing.
pub fn still_regular(path: &Path) -> io::Result<bool> {
    let meta = fs::symlink_metadata(path)?;
    Ok(non_regular_reason(&meta.file_type()).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> EmulatorConfig {
        let mut config = EmulatorConfig::new(dir);
        config.protected_names = vec!["emulator.py".to_string()];
        config
    }

    #[test]
    fn filters_dirs_marked_and_protected() {
        let dir = TempDir::new().expect("temp dir should create");
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("done.txt.locked"), "x").unwrap();
        fs::write(dir.path().join("emulator.py"), "print()").unwrap();
        fs::write(dir.path().join("RESTORE_FILES.txt"), "note").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let plan = enumerate(&config_for(dir.path())).expect("enumerate should succeed");
        let names: Vec<_> = plan.victims.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        let reasons: Vec<_> = plan
            .skipped
            .iter()
            .map(|s| (s.name.as_str(), s.reason))
            .collect();
        assert!(reasons.contains(&("done.txt.locked", SkipReason::AlreadyMarked)));
        assert!(reasons.contains(&("emulator.py", SkipReason::Protected)));
        assert!(reasons.contains(&("RESTORE_FILES.txt", SkipReason::Protected)));
        assert!(reasons.contains(&("nested", SkipReason::Directory)));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_never_victims() {
        let dir = TempDir::new().expect("temp dir should create");
        let outside = TempDir::new().expect("temp dir should create");
        fs::write(outside.path().join("real.txt"), "real").unwrap();
        std::os::unix::fs::symlink(outside.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();

        let plan = enumerate(&config_for(dir.path())).expect("enumerate should succeed");
        assert!(plan.victims.is_empty());
        assert_eq!(plan.skipped[0].reason, SkipReason::Symlink);
    }

    #[test]
    fn missing_directory_is_target_not_found() {
        let dir = TempDir::new().expect("temp dir should create");
        let missing = dir.path().join("gone");
        match enumerate(&config_for(&missing)) {
            Err(SimError::TargetNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected TargetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn file_as_target_is_target_not_found() {
        let dir = TempDir::new().expect("temp dir should create");
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            enumerate(&config_for(&file)),
            Err(SimError::TargetNotFound(_))
        ));
    }

    #[test]
    fn unreadable_entry_is_skipped() {
        let dir = TempDir::new().expect("temp dir should create");
        let failed = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));

        match sort_entry(failed, &config_for(dir.path())) {
            Err(skipped) => {
                assert_eq!(skipped.reason, SkipReason::Unreadable);
                assert_eq!(skipped.name, UNREADABLE_ENTRY);
            }
            Ok(victim) => panic!("expected a skip, got victim {}", victim.name),
        }
    }

    #[test]
    fn still_regular_tracks_type_changes() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("a.txt");
        fs::write(&path, "a").unwrap();
        assert!(still_regular(&path).expect("stat should succeed"));

        fs::remove_file(&path).unwrap();
        let err = still_regular(&path).expect_err("removed file should not stat");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        fs::create_dir(&path).unwrap();
        assert!(!still_regular(&path).expect("stat should succeed"));
    }
}
