// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rename-and-mark.

use crate::types::FileErrorKind;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `<dir>/<name><marker>`, built on the raw OS name so non-UTF-8 names survive.
pub fn marked_path(path: &Path, marker: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(marker);
    path.with_file_name(name)
}

/// Rename without replacing an existing destination.
///
/// The platform rename overwrites silently on Unix, so the check happens
/// first; the window between check and rename is accepted.
pub fn rename_no_clobber(from: &Path, to: &Path) -> Result<(), (FileErrorKind, io::Error)> {
    match fs::symlink_metadata(to) {
        Ok(_) => {
            return Err((
                FileErrorKind::DestinationExists,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists", to.display()),
                ),
            ))
        }
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err((FileErrorKind::Rename, e)),
        Err(_) => {}
    }
    fs::rename(from, to).map_err(|e| (FileErrorKind::Rename, e))
}
