// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report output module

pub mod formatter;
pub mod output;

use crate::types::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::{load_report, ReportOutputFormat};

/// Save a run report; the format defaults to the path's extension, then JSON
pub fn save_report(
    run: &RunSummary,
    path: &Path,
    format: Option<ReportOutputFormat>,
) -> Result<()> {
    let format = format
        .or_else(|| ReportOutputFormat::for_path(path))
        .unwrap_or(ReportOutputFormat::Json);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let content = format.serialize(run)?;
    fs::write(path, content).with_context(|| format!("writing run report {}", path.display()))?;
    Ok(())
}

pub fn print_run(run: &RunSummary) {
    ReportFormatter::new().print_run(run);
}

pub fn print_plan(plan: &TargetPlan) {
    ReportFormatter::new().print_plan(plan);
}

pub fn print_restore(summary: &RestoreSummary) {
    ReportFormatter::new().print_restore(summary);
}
