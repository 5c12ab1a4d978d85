// SPDX-License-Identifier: PMPL-1.0-or-later

//! Attack orchestration module

pub mod executor;
pub mod mark;
pub mod note;
pub mod pacing;
pub mod targets;
pub mod transform;

use crate::config::EmulatorConfig;
use crate::error::Result;
use crate::types::*;

pub use executor::AttackDriver;

/// Run a full attack simulation against the configured target directory
pub fn execute(config: EmulatorConfig) -> Result<RunSummary> {
    AttackDriver::new(config).execute()
}

/// Enumerate victims without touching them
pub fn plan(config: EmulatorConfig) -> Result<TargetPlan> {
    AttackDriver::new(config).plan()
}
