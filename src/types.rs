// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for ransom-sim
//!
//! Everything a run produces is a plain value so callers (and tests) can
//! assert on outcomes instead of scraping console output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// An eligible file selected during enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victim {
    pub name: String,
    pub path: PathBuf,
}

/// Why a directory entry was not selected as a victim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Directory,
    Symlink,
    SpecialFile,
    AlreadyMarked,
    Protected,
    Unreadable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::Directory => "directory",
            SkipReason::Symlink => "symlink",
            SkipReason::SpecialFile => "special file",
            SkipReason::AlreadyMarked => "already marked",
            SkipReason::Protected => "protected name",
            SkipReason::Unreadable => "unreadable metadata",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: SkipReason,
}

/// Stage at which a single file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    /// Removed between enumeration and processing
    Vanished,
    /// No longer a regular file when processing started
    TypeChanged,
    Transform,
    Rename,
    DestinationExists,
    /// Restored content does not match the recorded digest
    Verify,
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileErrorKind::Vanished => "vanished",
            FileErrorKind::TypeChanged => "type changed",
            FileErrorKind::Transform => "transform",
            FileErrorKind::Rename => "rename",
            FileErrorKind::DestinationExists => "destination exists",
            FileErrorKind::Verify => "verify",
        };
        write!(f, "{}", label)
    }
}

/// A recoverable, per-file failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub kind: FileErrorKind,
    pub filename: String,
    pub cause: String,
}

impl FileError {
    pub fn new(kind: FileErrorKind, filename: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            kind,
            filename: filename.into(),
            cause: cause.to_string(),
        }
    }
}

/// One completed transform+rename, in operation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpRecord {
    /// 1-based position in the victim list
    pub index: usize,
    pub filename: String,
    pub renamed_to: String,
    pub timestamp: String,
    /// SHA-256 of the content before the transform, hex encoded
    pub original_sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteOutcome {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NoteOutcome {
    pub fn dropped(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything a completed run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: String,
    pub target_dir: PathBuf,
    pub marker_extension: String,
    pub eligible: usize,
    pub records: Vec<OpRecord>,
    pub errors: Vec<FileError>,
    pub skipped: Vec<SkippedEntry>,
    pub note: NoteOutcome,
}

impl RunSummary {
    pub fn renamed_count(&self) -> usize {
        self.records.len()
    }

    pub fn status(&self) -> RunStatus {
        if !self.note.dropped() {
            RunStatus::NoteFailed
        } else if !self.errors.is_empty() {
            RunStatus::PerFileErrors
        } else {
            RunStatus::Clean
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Clean,
    PerFileErrors,
    NoteFailed,
}

/// Exit code for a missing target directory
pub const EXIT_TARGET_MISSING: u8 = 2;

impl RunStatus {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunStatus::Clean => 0,
            RunStatus::PerFileErrors => 3,
            RunStatus::NoteFailed => 4,
        }
    }
}

/// Result of enumeration alone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetPlan {
    pub target_dir: PathBuf,
    pub victims: Vec<Victim>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoredFile {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreSummary {
    pub target_dir: PathBuf,
    pub restored: Vec<RestoredFile>,
    pub verified: usize,
    pub errors: Vec<FileError>,
    pub note_removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(errors: Vec<FileError>, note_error: Option<String>) -> RunSummary {
        RunSummary {
            started_at: String::new(),
            finished_at: String::new(),
            target_dir: PathBuf::from("t"),
            marker_extension: ".locked".to_string(),
            eligible: 0,
            records: Vec::new(),
            errors,
            skipped: Vec::new(),
            note: NoteOutcome {
                path: PathBuf::from("t/RESTORE_FILES.txt"),
                error: note_error,
            },
        }
    }

    #[test]
    fn status_is_clean_without_errors() {
        assert_eq!(summary(Vec::new(), None).status(), RunStatus::Clean);
    }

    #[test]
    fn note_failure_outranks_file_errors() {
        let errors = vec![FileError::new(FileErrorKind::Transform, "a.txt", "denied")];
        let run = summary(errors.clone(), Some("disk full".to_string()));
        assert_eq!(run.status(), RunStatus::NoteFailed);
        assert_eq!(run.status().exit_code(), 4);

        let run = summary(errors, None);
        assert_eq!(run.status(), RunStatus::PerFileErrors);
        assert_eq!(run.status().exit_code(), 3);
    }
}
