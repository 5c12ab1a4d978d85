// SPDX-License-Identifier: PMPL-1.0-or-later

//! Emulator configuration and profile loading.
//!
//! The driver receives one immutable [`EmulatorConfig`]. Profiles (JSON or
//! YAML) only fill in the fields they name; CLI flags are applied on top by
//! the binary.

use crate::error::{Result, SimError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TARGET_DIR: &str = "test_files";
pub const DEFAULT_MARKER: &str = ".locked";
pub const DEFAULT_NOTE_FILENAME: &str = "RESTORE_FILES.txt";
pub const DEFAULT_NOTE_CONTENT: &str = "
ATTENTION!
All your files have been encrypted by the detection test suite.
Contact your system administrator for the decryption key.
This is a simulation. No actual harm has been done.
";
/// 20ms between operations, roughly 50 ops/sec
pub const DEFAULT_DELAY: Duration = Duration::from_millis(20);
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorConfig {
    pub target_dir: PathBuf,
    pub marker_extension: String,
    pub note_filename: String,
    pub note_content: String,
    /// Applied after every file, whatever its outcome
    pub delay: Duration,
    /// Applied once between enumeration and the first operation
    pub initial_delay: Duration,
    /// Include a wall-clock timestamp in each progress line
    pub log_timestamps: bool,
    /// Names never selected as victims (the emulator's own binary, extra exclusions)
    pub protected_names: Vec<String>,
    /// Suppress progress output
    pub quiet: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            marker_extension: DEFAULT_MARKER.to_string(),
            note_filename: DEFAULT_NOTE_FILENAME.to_string(),
            note_content: DEFAULT_NOTE_CONTENT.to_string(),
            delay: DEFAULT_DELAY,
            initial_delay: DEFAULT_INITIAL_DELAY,
            log_timestamps: true,
            protected_names: default_protected_names(),
            quiet: false,
        }
    }
}

impl EmulatorConfig {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            ..Self::default()
        }
    }

    /// Overlay the fields a profile sets. Profile exclusions extend the protected list.
    pub fn apply_profile(&mut self, profile: &Profile) {
        if let Some(dir) = &profile.target_dir {
            self.target_dir = dir.clone();
        }
        if let Some(marker) = &profile.marker_extension {
            self.marker_extension = marker.clone();
        }
        if let Some(name) = &profile.note_filename {
            self.note_filename = name.clone();
        }
        if let Some(content) = &profile.note_content {
            self.note_content = content.clone();
        }
        if let Some(delay) = profile.delay {
            self.delay = delay;
        }
        if let Some(delay) = profile.initial_delay {
            self.initial_delay = delay;
        }
        if let Some(flag) = profile.log_timestamps {
            self.log_timestamps = flag;
        }
        for name in &profile.exclude {
            if !self.protected_names.contains(name) {
                self.protected_names.push(name.clone());
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.marker_extension.is_empty() {
            return Err(SimError::InvalidConfig(
                "marker extension cannot be empty".to_string(),
            ));
        }
        if !is_plain_file_name(&self.marker_extension) {
            return Err(SimError::InvalidConfig(format!(
                "marker extension '{}' must not contain path separators",
                self.marker_extension
            )));
        }
        if !is_plain_file_name(&self.note_filename) || self.note_filename.is_empty() {
            return Err(SimError::InvalidConfig(format!(
                "note filename '{}' must be a plain file name",
                self.note_filename
            )));
        }
        if self.note_filename.ends_with(&self.marker_extension) {
            return Err(SimError::InvalidConfig(format!(
                "note filename '{}' carries the marker extension",
                self.note_filename
            )));
        }
        Ok(())
    }

    /// The note is protected too, so a rerun never rewrites the previous note as a victim.
    pub fn is_protected(&self, name: &str) -> bool {
        name == self.note_filename || self.protected_names.iter().any(|p| p == name)
    }

    pub fn note_path(&self) -> PathBuf {
        self.target_dir.join(&self.note_filename)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.contains('/') && !name.contains('\\') && name != "." && name != ".."
}

/// The running executable's own file name, plus the installed binary name.
pub fn default_protected_names() -> Vec<String> {
    let mut names = vec![env!("CARGO_PKG_NAME").to_string()];
    if let Some(own) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().to_string()))
    {
        if !names.contains(&own) {
            names.push(own);
        }
    }
    names
}

/// Profile overrides, all optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub target_dir: Option<PathBuf>,
    pub marker_extension: Option<String>,
    pub note_filename: Option<String>,
    pub note_content: Option<String>,
    pub delay: Option<Duration>,
    pub initial_delay: Option<Duration>,
    pub log_timestamps: Option<bool>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileSpec {
    target_dir: Option<PathBuf>,
    marker_extension: Option<String>,
    note_filename: Option<String>,
    note_content: Option<String>,
    delay_seconds: Option<f64>,
    initial_delay_seconds: Option<f64>,
    log_timestamps: Option<bool>,
    #[serde(default)]
    exclude: Vec<String>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let profile_err = |message: String| SimError::Profile {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| profile_err(e.to_string()))?;
        let spec: ProfileSpec = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| profile_err(e.to_string()))?
            }
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| profile_err(e.to_string()))?
            }
            _ => {
                return Err(profile_err(
                    "unsupported profile extension (expected .json, .yaml or .yml)".to_string(),
                ))
            }
        };

        let seconds = |label: &str, raw: Option<f64>| -> Result<Option<Duration>> {
            raw.map(|value| {
                Duration::try_from_secs_f64(value)
                    .map_err(|_| profile_err(format!("{} must be a non-negative number", label)))
            })
            .transpose()
        };

        Ok(Profile {
            delay: seconds("delay_seconds", spec.delay_seconds)?,
            initial_delay: seconds("initial_delay_seconds", spec.initial_delay_seconds)?,
            target_dir: spec.target_dir,
            marker_extension: spec.marker_extension,
            note_filename: spec.note_filename,
            note_content: spec.note_content,
            log_timestamps: spec.log_timestamps,
            exclude: spec.exclude,
        })
    }
}

/// Parse `20ms`, `1s`, `0.5s`, `2m`, `1h`; a bare number is seconds.
pub fn parse_duration(raw: &str) -> std::result::Result<Duration, String> {
    let trimmed = raw.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Err("duration cannot be empty".to_string());
    }

    let (value_str, unit) = if let Some(v) = trimmed.strip_suffix("ms") {
        (v, "ms")
    } else if let Some(v) = trimmed.strip_suffix('s') {
        (v, "s")
    } else if let Some(v) = trimmed.strip_suffix('m') {
        (v, "m")
    } else if let Some(v) = trimmed.strip_suffix('h') {
        (v, "h")
    } else {
        (trimmed.as_str(), "s")
    };

    let value: f64 = value_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{}'", raw))?;
    if !value.is_finite() || value.is_sign_negative() {
        return Err(format!("duration cannot be negative: {}", raw));
    }

    let millis = match unit {
        "ms" => value,
        "m" => value * 60_000.0,
        "h" => value * 3_600_000.0,
        _ => value * 1000.0,
    };
    Ok(Duration::from_micros((millis * 1000.0).round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration_units() {
        assert_eq!(parse_duration("20ms").unwrap(), Duration::from_millis(20));
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("0.5").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration("fast").is_err());
    }

    #[test]
    fn note_filename_is_always_protected() {
        let config = EmulatorConfig::new("x");
        assert!(config.is_protected(DEFAULT_NOTE_FILENAME));
        assert!(config.is_protected(env!("CARGO_PKG_NAME")));
        assert!(!config.is_protected("a.txt"));
    }

    #[test]
    fn validate_rejects_path_like_names() {
        let mut config = EmulatorConfig::new("x");
        config.note_filename = "../escape.txt".to_string();
        assert!(config.validate().is_err());

        let mut config = EmulatorConfig::new("x");
        config.marker_extension.clear();
        assert!(config.validate().is_err());

        assert!(EmulatorConfig::new("x").validate().is_ok());
    }
}
