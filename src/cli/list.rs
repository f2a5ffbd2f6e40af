//! List configured packages in load order.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::common::CommandContext;
use crate::core::PackageKind;
use crate::manifest;
use crate::resolver;

/// Output format for `afx list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned line per package
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Command to list packages.
#[derive(Args, Debug, Default)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only show packages that are not installed
    #[arg(long)]
    pub missing: bool,
}

/// One row of `afx list` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub kind: PackageKind,
    pub home: PathBuf,
    pub installed: bool,
    #[serde(rename = "depends-on", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ListCommand {
    /// Prints the packages.
    ///
    /// # Errors
    ///
    /// Fails on config errors, duplicated names and dependency cycles.
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let entries = self.entries(config_path)?;
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            OutputFormat::Text => print!("{}", format_text(&entries)),
        }
        Ok(())
    }

    /// Packages in load order, filtered per the flags.
    ///
    /// # Errors
    ///
    /// See [`ListCommand::execute`].
    pub fn entries(&self, config_path: Option<&Path>) -> Result<Vec<ListEntry>> {
        let ctx = CommandContext::load(config_path)?;
        manifest::validate(&ctx.packages)?;
        let resolution = resolver::sort(&ctx.packages)?;
        for missing in &resolution.missing {
            warn!("{missing}");
        }

        Ok(resolution
            .packages
            .iter()
            .map(|pkg| ListEntry {
                name: pkg.name().to_string(),
                kind: pkg.kind(),
                home: pkg.home().to_path_buf(),
                installed: pkg.installed(&ctx.layout.bin_dir),
                depends_on: pkg.depends_on().to_vec(),
                description: pkg.description().to_string(),
            })
            .filter(|entry| !self.missing || !entry.installed)
            .collect())
    }
}

fn format_text(entries: &[ListEntry]) -> String {
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        let mark = if entry.installed {
            "✓".green()
        } else {
            "✗".red()
        };
        out.push_str(&format!(
            "{mark} {:<width$}  {:<6}  {}\n",
            entry.name,
            entry.kind.to_string(),
            entry.home.display()
        ));
    }
    out
}
