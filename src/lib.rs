// SPDX-License-Identifier: PMPL-1.0-or-later

//! ransom-sim — paced ransomware I/O emulation for detector validation.
//!
//! Reproduces the file-level signature of an encrypting attack against a
//! directory of operator-owned fixtures: bulk content rewrite, marker
//! extension renames, and a dropped note, at a fixed operation rate so
//! rate-based and context-based heuristics can be exercised reproducibly.
//!
//! The "encryption" is byte reversal. It is its own inverse, which is what
//! makes [`restore`] possible without any key.

pub mod attack;
pub mod config;
pub mod error;
pub mod logger;
pub mod report;
pub mod restore;
pub mod seed;
pub mod types;

pub use attack::AttackDriver;
pub use config::{EmulatorConfig, Profile};
pub use error::SimError;
