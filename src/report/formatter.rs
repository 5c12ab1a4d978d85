// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console summaries

use crate::types::*;
use colored::*;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_run(&self, run: &RunSummary) {
        println!("\n{}", "=== ATTACK SIMULATION SUMMARY ===".bold().cyan());
        println!("  Target: {}", run.target_dir.display());
        println!("  Started: {}", run.started_at);
        println!("  Finished: {}", run.finished_at);
        println!();

        println!("  Eligible files: {}", run.eligible);
        println!(
            "  Renamed with {}: {}",
            run.marker_extension,
            run.renamed_count().to_string().green()
        );
        let failed = run.errors.len();
        println!(
            "  Per-file errors: {}",
            if failed > 0 {
                failed.to_string().red().bold()
            } else {
                failed.to_string().normal()
            }
        );
        println!("  Skipped entries: {}", run.skipped.len());

        if !run.errors.is_empty() {
            println!();
            println!("{}", "  ERRORS".bold().red());
            for err in &run.errors {
                println!("    - {} [{}] {}", err.filename, err.kind, err.cause.dimmed());
            }
        }

        println!();
        match &run.note.error {
            None => println!("  Note: {}", run.note.path.display()),
            Some(cause) => println!(
                "  Note: {} ({})",
                "NOT DROPPED".red().bold(),
                cause
            ),
        }

        let status = match run.status() {
            RunStatus::Clean => "COMPLETED".green().bold(),
            RunStatus::PerFileErrors => "COMPLETED WITH ERRORS".yellow().bold(),
            RunStatus::NoteFailed => "NOTE DROP FAILED".red().bold(),
        };
        println!("  Status: {}", status);
    }

    pub fn print_plan(&self, plan: &TargetPlan) {
        println!("\n{}", "=== TARGET PLAN (dry run) ===".bold().cyan());
        println!("  Target: {}", plan.target_dir.display());
        println!("  Victims: {}", plan.victims.len());
        for (i, victim) in plan.victims.iter().enumerate() {
            println!("    {}. {}", i + 1, victim.name);
        }

        if !plan.skipped.is_empty() {
            println!("  Skipped: {}", plan.skipped.len());
            for entry in &plan.skipped {
                println!("    - {} ({})", entry.name, entry.reason.to_string().dimmed());
            }
        }
    }

    pub fn print_restore(&self, summary: &RestoreSummary) {
        println!("\n{}", "=== RESTORE SUMMARY ===".bold().cyan());
        println!("  Target: {}", summary.target_dir.display());
        println!("  Restored: {}", summary.restored.len().to_string().green());
        println!("  Verified against report: {}", summary.verified);
        println!(
            "  Errors: {}",
            if summary.errors.is_empty() {
                "0".normal()
            } else {
                summary.errors.len().to_string().red().bold()
            }
        );
        println!(
            "  Note removed: {}",
            if summary.note_removed { "yes" } else { "no" }
        );
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
