// SPDX-License-Identifier: PMPL-1.0-or-later

//! Profile loading and overlay onto the default configuration

use ransom_sim::config::{EmulatorConfig, Profile, DEFAULT_DELAY, DEFAULT_MARKER};
use ransom_sim::SimError;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_json_profile_overrides_named_fields_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(
        &path,
        r#"{
            "target_dir": "/srv/fixtures",
            "delay_seconds": 0.05,
            "log_timestamps": false,
            "exclude": ["keep.me"]
        }"#,
    )
    .unwrap();

    let profile = Profile::load(&path).expect("json profile should load");
    let mut config = EmulatorConfig::default();
    config.apply_profile(&profile);

    assert_eq!(config.target_dir, PathBuf::from("/srv/fixtures"));
    assert_eq!(config.delay, Duration::from_millis(50));
    assert!(!config.log_timestamps);
    assert!(config.is_protected("keep.me"));
    assert_eq!(config.marker_extension, DEFAULT_MARKER);
}

#[test]
fn test_yaml_profile() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.yml");
    fs::write(
        &path,
        "marker_extension: .enc\nnote_filename: HOW_TO_DECRYPT.txt\ninitial_delay_seconds: 0\n",
    )
    .unwrap();

    let profile = Profile::load(&path).expect("yaml profile should load");
    let mut config = EmulatorConfig::default();
    config.apply_profile(&profile);

    assert_eq!(config.marker_extension, ".enc");
    assert_eq!(config.note_filename, "HOW_TO_DECRYPT.txt");
    assert_eq!(config.initial_delay, Duration::ZERO);
    assert_eq!(config.delay, DEFAULT_DELAY);
}

#[test]
fn test_profile_rejects_unknown_keys_and_negative_delays() {
    let dir = TempDir::new().unwrap();

    let unknown = dir.path().join("unknown.json");
    fs::write(&unknown, r#"{"delay_ms": 20}"#).unwrap();
    assert!(matches!(
        Profile::load(&unknown),
        Err(SimError::Profile { .. })
    ));

    let negative = dir.path().join("negative.json");
    fs::write(&negative, r#"{"delay_seconds": -1}"#).unwrap();
    assert!(matches!(
        Profile::load(&negative),
        Err(SimError::Profile { .. })
    ));
}

#[test]
fn test_profile_extension_dispatch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.toml");
    fs::write(&path, "delay_seconds = 1").unwrap();
    assert!(Profile::load(&path).is_err());
}
