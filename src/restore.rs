// SPDX-License-Identifier: PMPL-1.0-or-later

//! Restore: undo a run by reversing marked files again and stripping the marker.
//!
//! The transform is its own inverse, so no key material is involved. With a
//! run report only the files that run renamed are touched, and restored
//! content is checked against the digests it recorded. Without one, every
//! marked file in the directory is a candidate and must be asked for
//! explicitly with [`RestoreScope::AllMarked`].

use crate::attack::mark::rename_no_clobber;
use crate::attack::targets::still_regular;
use crate::attack::transform::{sha256_hex, transform_file};
use crate::config::EmulatorConfig;
use crate::error::{Result, SimError};
use crate::types::*;
use colored::*;
use log::{debug, warn};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

/// Which marked files a restore may touch
#[derive(Debug, Clone, Copy)]
pub enum RestoreScope<'a> {
    /// Only the files renamed by this run
    Recorded(&'a RunSummary),
    /// Every file carrying the configured marker, including ones no run touched
    AllMarked,
}

struct Candidate<'a> {
    marked: String,
    original: String,
    expected_sha256: Option<&'a str>,
}

pub fn restore(config: &EmulatorConfig, scope: RestoreScope<'_>) -> Result<RestoreSummary> {
    config.validate()?;
    let dir = &config.target_dir;
    if !dir.is_dir() {
        return Err(SimError::TargetNotFound(dir.clone()));
    }

    let mut errors = Vec::new();
    let candidates = match scope {
        RestoreScope::Recorded(run) => recorded_candidates(run, &mut errors),
        RestoreScope::AllMarked => {
            warn!(
                "restoring every *{} file in {}, including files no run touched",
                config.marker_extension,
                dir.display()
            );
            marked_candidates(dir, &config.marker_extension)?
        }
    };

    let mut restored = Vec::new();
    let mut verified = 0;

    for candidate in &candidates {
        let from = dir.join(&candidate.marked);
        let to = dir.join(&candidate.original);

        if let Err(err) = check_restorable(&candidate.marked, &from, &to) {
            errors.push(err);
            continue;
        }
        if let Err(e) = transform_file(&from) {
            errors.push(FileError::new(FileErrorKind::Transform, &candidate.marked, e));
            continue;
        }
        if let Err((kind, e)) = rename_no_clobber(&from, &to) {
            errors.push(FileError::new(kind, &candidate.marked, e));
            continue;
        }

        if let Some(expected) = candidate.expected_sha256 {
            match fs::read(&to) {
                Ok(content) if sha256_hex(&content) == expected => verified += 1,
                Ok(_) => errors.push(FileError::new(
                    FileErrorKind::Verify,
                    &candidate.original,
                    "restored content does not match the recorded digest",
                )),
                Err(e) => errors.push(FileError::new(FileErrorKind::Verify, &candidate.original, e)),
            }
        }

        if !config.quiet {
            println!(
                "{} Restored: {} -> {}",
                "[+]".green(),
                candidate.marked,
                candidate.original
            );
        }
        restored.push(RestoredFile {
            from: candidate.marked.clone(),
            to: candidate.original.clone(),
        });
    }

    for err in &errors {
        warn!("restore of {} failed at {}: {}", err.filename, err.kind, err.cause);
        if !config.quiet {
            println!(
                "{} Error restoring {} ({}): {}",
                "[!]".red().bold(),
                err.filename,
                err.kind,
                err.cause
            );
        }
    }

    let note_path = match scope {
        RestoreScope::Recorded(run) => run
            .note
            .path
            .file_name()
            .map(|name| dir.join(name))
            .unwrap_or_else(|| config.note_path()),
        RestoreScope::AllMarked => config.note_path(),
    };
    let note_removed = remove_note(&note_path, &config.note_content);

    Ok(RestoreSummary {
        target_dir: dir.clone(),
        restored,
        verified,
        errors,
        note_removed,
    })
}

/// Nothing is transformed unless the marked file is still a regular file and
/// the original name is free.
fn check_restorable(name: &str, from: &Path, to: &Path) -> std::result::Result<(), FileError> {
    match still_regular(from) {
        Ok(true) => {}
        Ok(false) => {
            return Err(FileError::new(
                FileErrorKind::TypeChanged,
                name,
                "no longer a regular file",
            ))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FileError::new(FileErrorKind::Vanished, name, e))
        }
        Err(e) => return Err(FileError::new(FileErrorKind::Transform, name, e)),
    }
    if fs::symlink_metadata(to).is_ok() {
        return Err(FileError::new(
            FileErrorKind::DestinationExists,
            name,
            format!("{} already exists", to.display()),
        ));
    }
    Ok(())
}

/// Records from a run report. Entries that do not look like `<filename><marker>`
/// are rejected rather than guessed at.
fn recorded_candidates<'a>(run: &'a RunSummary, errors: &mut Vec<FileError>) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();
    for record in &run.records {
        let expected_name = format!("{}{}", record.filename, run.marker_extension);
        if record.renamed_to != expected_name || !is_plain_name(&record.filename) {
            errors.push(FileError::new(
                FileErrorKind::Verify,
                &record.renamed_to,
                format!(
                    "report record does not match '{}' + '{}'",
                    record.filename, run.marker_extension
                ),
            ));
            continue;
        }
        candidates.push(Candidate {
            marked: record.renamed_to.clone(),
            original: record.filename.clone(),
            expected_sha256: Some(record.original_sha256.as_str()),
        });
    }
    candidates
}

fn is_plain_name(name: &str) -> bool {
    Path::new(name).file_name() == Some(OsStr::new(name))
}

/// Regular, UTF-8 named files carrying the marker (and something before it).
fn marked_candidates(dir: &Path, marker: &str) -> Result<Vec<Candidate<'static>>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            debug!("skipping non-UTF-8 entry {:?}", entry.file_name());
            continue;
        };
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && name.len() > marker.len() && name.ends_with(marker) {
            candidates.push(Candidate {
                original: name[..name.len() - marker.len()].to_string(),
                marked: name,
                expected_sha256: None,
            });
        }
    }
    candidates.sort_by(|a, b| a.marked.cmp(&b.marked));
    Ok(candidates)
}

/// Only a note whose content is exactly ours is removed.
fn remove_note(path: &Path, note_content: &str) -> bool {
    match fs::read(path) {
        Ok(content) if content == note_content.as_bytes() => match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to remove note {}: {}", path.display(), e);
                false
            }
        },
        Ok(_) => {
            debug!("{} differs from the configured note, leaving it", path.display());
            false
        }
        Err(_) => false,
    }
}
