// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for exported run reports

use crate::types::RunSummary;
use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Json,
    Yaml,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            _ => None,
        }
    }

    /// Pick the format from a file extension
    pub fn for_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportOutputFormat::Json => "json",
            ReportOutputFormat::Yaml => "yaml",
        }
    }

    pub fn serialize(&self, run: &RunSummary) -> Result<String> {
        match self {
            ReportOutputFormat::Json => Ok(serde_json::to_string_pretty(run)?),
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(run)?),
        }
    }
}

/// Load a report written by [`crate::report::save_report`]
pub fn load_report(path: &Path) -> Result<RunSummary> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading run report {}", path.display()))?;
    match ReportOutputFormat::for_path(path) {
        Some(ReportOutputFormat::Json) => serde_json::from_str(&content)
            .with_context(|| format!("parsing json run report {}", path.display())),
        Some(ReportOutputFormat::Yaml) => serde_yaml::from_str(&content)
            .with_context(|| format!("parsing yaml run report {}", path.display())),
        None => Err(anyhow!(
            "unsupported run report extension for {}",
            path.display()
        )),
    }
}
