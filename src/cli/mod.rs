//! Command-line interface for afx.
//!
//! Each subcommand lives in its own module with its own argument struct and
//! an `execute` method. All of them share [`common::CommandContext`], which
//! loads the config files, fixes the on-disk [`Layout`](crate::config::Layout)
//! and normalizes packages.
//!
//! # Available Commands
//!
//! - `init` - print the shell initialization script
//! - `validate` - check config files, names and dependencies
//! - `list` - show packages in load order with their install state
//! - `config` - show the effective settings
//!
//! # Output
//!
//! Command output goes to stdout. Logs, warnings and errors go to stderr, so
//! `source <(afx init)` only ever sees shell code.
//!
//! # Global Options
//!
//! - `--config <PATH>`: config file or directory (defaults to
//!   `$AFX_CONFIG_PATH`, then `~/.config/afx`)
//! - `-v, --verbose`: debug logging
//! - `-q, --quiet`: errors only

mod common;
mod config;
mod init;
mod list;
mod validate;

pub use common::CommandContext;
pub use config::{ConfigCommand, EffectiveConfig};
pub use init::InitCommand;
pub use list::{ListCommand, ListEntry, OutputFormat};
pub use validate::ValidateCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter when no flag is given.
pub const LOG_ENV: &str = "AFX_LOG";

/// Main CLI structure for afx.
#[derive(Parser, Debug)]
#[command(
    name = "afx",
    about = "Declarative package manager for shell plugins and commands",
    version,
    long_about = None
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    ///
    /// Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file or directory to read packages from.
    ///
    /// A directory is searched recursively for `.yaml` and `.yml` files.
    /// Defaults to `$AFX_CONFIG_PATH`, then `~/.config/afx`.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the shell initialization script.
    ///
    /// Evaluate the output from your shell's startup file, e.g.
    /// `source <(afx init)`.
    Init(InitCommand),

    /// Check config files, package names and dependencies.
    Validate(ValidateCommand),

    /// List packages in load order.
    List(ListCommand),

    /// Show the effective settings.
    Config(ConfigCommand),
}

impl Cli {
    /// Runs the selected subcommand.
    ///
    /// # Errors
    ///
    /// Returns whatever error the subcommand produced; the caller renders it.
    pub fn execute(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Init(cmd) => cmd.execute(config),
            Commands::Validate(cmd) => cmd.execute(config),
            Commands::List(cmd) => cmd.execute(config),
            Commands::Config(cmd) => cmd.execute(config),
        }
    }

    /// Log filter directive for this invocation.
    ///
    /// `--verbose` and `--quiet` win; otherwise `$AFX_LOG`, then `$RUST_LOG`,
    /// then `warn`.
    #[must_use]
    pub fn log_level(&self) -> String {
        if self.verbose {
            return "debug".to_string();
        }
        if self.quiet {
            return "error".to_string();
        }
        [LOG_ENV, "RUST_LOG"]
            .iter()
            .find_map(|key| env::var(key).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "warn".to_string())
    }

    /// Installs the global tracing subscriber, writing to stderr.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_new(self.log_level()).unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_target(false)
            .without_time()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["afx", "list", "--format", "json", "-c", "/tmp/afx", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/afx")));
        match cli.command {
            Commands::List(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["afx", "-v", "-q", "init"]).is_err());
    }

    #[test]
    #[serial]
    fn test_log_level_precedence() {
        unsafe {
            env::set_var(LOG_ENV, "afx=trace");
        }
        assert_eq!(Cli::parse_from(["afx", "init"]).log_level(), "afx=trace");
        assert_eq!(Cli::parse_from(["afx", "-q", "init"]).log_level(), "error");
        assert_eq!(Cli::parse_from(["afx", "-v", "init"]).log_level(), "debug");
        unsafe {
            env::remove_var(LOG_ENV);
            env::remove_var("RUST_LOG");
        }
        assert_eq!(Cli::parse_from(["afx", "init"]).log_level(), "warn");
    }
}
