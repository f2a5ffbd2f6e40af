//! Print the shell initialization script.
//!
//! `afx init` is meant to be evaluated by the shell at startup:
//!
//! ```bash
//! # ~/.zshrc
//! source <(afx init)
//! ```
//!
//! The script goes to stdout and nothing else does. Packages that cannot be
//! loaded (not installed, `if` failed, no source files) are skipped with a
//! warning on stderr so one broken package never breaks the shell.

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

use super::common::CommandContext;
use crate::init::{Compiler, ShellGate};
use crate::manifest;
use crate::resolver;
use crate::utils::command_exists;

/// Command to print the shell initialization script.
#[derive(Args, Debug, Default)]
pub struct InitCommand {}

impl InitCommand {
    /// Loads the config, orders packages and writes the script to stdout.
    ///
    /// # Errors
    ///
    /// Fails on config errors, duplicated package names and dependency
    /// cycles. Missing dependencies are only warned about.
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let script = self.render(config_path)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(script.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Builds the script without printing it.
    ///
    /// # Errors
    ///
    /// See [`InitCommand::execute`].
    pub fn render(&self, config_path: Option<&Path>) -> Result<String> {
        let ctx = CommandContext::load(config_path)?;
        manifest::validate(&ctx.packages)?;

        let resolution = resolver::sort(&ctx.packages)?;
        for missing in &resolution.missing {
            warn!("{missing}");
        }

        let gate = ShellGate::from_env(&ctx.loaded.app);
        let gated = resolution.packages.iter().any(|p| {
            p.plugin().is_some_and(|plugin| !plugin.condition.is_empty())
                || p.command().is_some_and(|command| !command.condition.is_empty())
        });
        if gated && !command_exists(gate.shell()) {
            warn!("{}: shell not found, `if` conditions will fail", gate.shell());
        }

        let compiler = Compiler::new(gate, &ctx.layout);
        let script = compiler.script(&resolution.packages);
        info!("Generated init script for {} package(s)", resolution.packages.len());
        Ok(script)
    }
}
