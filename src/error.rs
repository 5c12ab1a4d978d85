// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fatal error conditions. Per-file failures are values, see [`crate::types::FileError`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("target directory not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    #[error("profile error in {}: {message}", .path.display())]
    Profile { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
