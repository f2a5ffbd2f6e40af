//! Check the configuration without generating anything.
//!
//! Runs the same checks as `afx init` but reports every problem instead of
//! stopping at the first fatal one:
//!
//! - config files decode and satisfy the schema
//! - package names are unique
//! - every `depends-on` names a configured package
//! - dependencies have no cycle

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::common::CommandContext;
use crate::core::AfxError;
use crate::manifest;
use crate::resolver;

/// Command to validate the configuration.
#[derive(Args, Debug, Default)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Prints a summary on success and each problem on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or any check fails.
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let ctx = CommandContext::load(config_path)?;
        let problems = Self::check(&ctx);

        if problems.is_empty() {
            println!(
                "{} {} package(s) in {} file(s) are valid",
                "✓".green(),
                ctx.packages.len(),
                ctx.loaded.files.len()
            );
            return Ok(());
        }

        for problem in &problems {
            eprintln!("{} {problem}", "✗".red());
        }
        bail!("{} problem(s) found in {}", problems.len(), ctx.config_path.display())
    }

    /// Collects every problem with the loaded packages.
    pub fn check(ctx: &CommandContext) -> Vec<AfxError> {
        let mut problems = Vec::new();

        if let Err(e) = manifest::validate(&ctx.packages) {
            problems.push(e);
        }

        match resolver::sort(&ctx.packages) {
            Ok(resolution) => {
                if let Err(e) = resolution.into_result() {
                    problems.push(e);
                }
            }
            Err(AfxError::CircularDependency {
                chain,
                missing,
            }) => {
                problems.push(AfxError::CircularDependency {
                    chain,
                    missing: Vec::new(),
                });
                if !missing.is_empty() {
                    problems.push(AfxError::MissingDependencies {
                        missing,
                    });
                }
            }
            Err(e) => problems.push(e),
        }

        problems
    }
}
