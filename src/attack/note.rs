// SPDX-License-Identifier: PMPL-1.0-or-later

//! Ransom note drop.

use crate::config::EmulatorConfig;
use crate::types::NoteOutcome;
use log::warn;
use std::fs;

/// Write the note, overwriting any previous one. Failure is captured, not raised.
pub fn drop_note(config: &EmulatorConfig) -> NoteOutcome {
    let path = config.note_path();
    match fs::write(&path, config.note_content.as_bytes()) {
        Ok(()) => NoteOutcome { path, error: None },
        Err(e) => {
            warn!("failed to drop note {}: {}", path.display(), e);
            NoteOutcome {
                path,
                error: Some(e.to_string()),
            }
        }
    }
}
