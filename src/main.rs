// SPDX-License-Identifier: PMPL-1.0-or-later

//! ransom-sim: paced ransomware I/O emulator
//!
//! Exit codes: 0 clean, 1 usage or unexpected failure, 2 target directory
//! missing, 3 completed with per-file errors, 4 note could not be dropped.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use ransom_sim::config::parse_duration;
use ransom_sim::report::{self, ReportOutputFormat};
use ransom_sim::restore::RestoreScope;
use ransom_sim::seed::{self, SeedConfig};
use ransom_sim::types::EXIT_TARGET_MISSING;
use ransom_sim::{attack, logger, restore, EmulatorConfig, Profile, SimError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ransom-sim")]
#[command(version)]
#[command(about = "Paced ransomware I/O emulator for validating file-activity detectors")]
#[command(long_about = None)]
struct Cli {
    /// Debug-level diagnostic logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform, mark and pace every eligible file, then drop the note
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Delay after each file (e.g. 20ms, 0.5s)
        #[arg(short, long, value_parser = parse_duration)]
        delay: Option<Duration>,

        /// One-time delay between enumeration and the first file
        #[arg(long, value_parser = parse_duration)]
        initial_delay: Option<Duration>,

        /// Omit wall-clock timestamps from progress lines
        #[arg(long)]
        no_timestamps: bool,

        /// Write a run report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format (defaults to the output extension, then json)
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        /// Suppress per-file progress lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the files a run would touch, without touching them
    Plan {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Reverse marked files back and strip the marker
    Restore {
        #[command(flatten)]
        target: TargetArgs,

        /// Run report naming the files to restore; content is verified against it
        #[arg(short, long, conflicts_with = "all")]
        report: Option<PathBuf>,

        /// Restore every marked file in the directory, not just those a run renamed
        #[arg(long)]
        all: bool,

        /// Suppress per-file progress lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Create a directory of deterministic fixture files
    Seed {
        /// Directory to populate (created if missing)
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Number of files
        #[arg(short, long, default_value = "20")]
        count: usize,

        /// Size of each file in bytes
        #[arg(short, long, default_value = "512")]
        size: usize,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Target directory (default: profile value, then ./test_files)
    #[arg(value_name = "TARGET")]
    target: Option<PathBuf>,

    /// JSON or YAML profile
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Marker extension appended to processed files
    #[arg(long)]
    marker: Option<String>,

    /// File name of the dropped note
    #[arg(long)]
    note_name: Option<String>,

    /// Extra file names never to touch
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,
}

impl TargetArgs {
    fn to_config(&self) -> Result<EmulatorConfig> {
        let mut config = EmulatorConfig::default();
        if let Some(path) = &self.profile {
            let profile = Profile::load(path)?;
            config.apply_profile(&profile);
        }
        if let Some(target) = &self.target {
            config.target_dir = target.clone();
        }
        if let Some(marker) = &self.marker {
            config.marker_extension = marker.clone();
        }
        if let Some(name) = &self.note_name {
            config.note_filename = name.clone();
        }
        for name in &self.exclude {
            if !config.protected_names.contains(name) {
                config.protected_names.push(name.clone());
            }
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    match run_command(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            match e.downcast_ref::<SimError>() {
                Some(SimError::TargetNotFound(_)) => ExitCode::from(EXIT_TARGET_MISSING),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run_command(cli: Cli) -> Result<u8> {
    match cli.command {
        Commands::Run {
            target,
            delay,
            initial_delay,
            no_timestamps,
            output,
            format,
            quiet,
        } => {
            let mut config = target.to_config()?;
            if let Some(delay) = delay {
                config.delay = delay;
            }
            if let Some(delay) = initial_delay {
                config.initial_delay = delay;
            }
            if no_timestamps {
                config.log_timestamps = false;
            }
            config.quiet = quiet;

            let run = attack::execute(config)?;
            report::print_run(&run);

            if let Some(mut path) = output {
                if path.extension().is_none() {
                    let format = format.unwrap_or(ReportOutputFormat::Json);
                    path.set_extension(format.extension());
                }
                report::save_report(&run, &path, format)?;
                println!("Report saved to: {}", path.display());
            }

            if !quiet {
                println!("{} Attack simulation completed.", "[*]".cyan());
            }
            Ok(run.status().exit_code())
        }

        Commands::Plan { target } => {
            let config = target.to_config()?;
            let plan = attack::plan(config)?;
            report::print_plan(&plan);
            Ok(0)
        }

        Commands::Restore {
            target,
            report: report_path,
            all,
            quiet,
        } => {
            let mut config = target.to_config()?;
            config.quiet = quiet;

            let recorded = match &report_path {
                Some(path) => Some(report::load_report(path)?),
                None if all => None,
                None => bail!("restore needs --report <FILE> or --all"),
            };
            let scope = match &recorded {
                Some(run) => RestoreScope::Recorded(run),
                None => RestoreScope::AllMarked,
            };
            let summary = restore::restore(&config, scope)?;
            report::print_restore(&summary);

            Ok(if summary.errors.is_empty() { 0 } else { 3 })
        }

        Commands::Seed {
            directory,
            count,
            size,
        } => {
            let config = SeedConfig {
                directory,
                count,
                size,
            };
            let created = seed::seed(&config)
                .with_context(|| format!("seeding {}", config.directory.display()))?;
            println!(
                "Created {} fixtures ({} bytes each); {} fixtures now in {}",
                created.len(),
                size,
                seed::count_fixtures(&config.directory),
                config.directory.display()
            );
            Ok(0)
        }
    }
}
