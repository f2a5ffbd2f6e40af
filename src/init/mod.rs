//! Generation of the shell initialization script.
//!
//! Each package compiles to a fragment of shell code. The plugin fragment
//! goes through a fixed sequence of stages:
//!
//! ```text
//! Start ──> GateCheck ──> SourceResolve ──> Emit ──> Done
//!   │           │               │
//!   └ not       └ `if` exits    └ no source
//!     installed   non-zero        file matched
//! ```
//!
//! and produces, in order:
//!
//! 1. `snippet-prepare`
//! 2. one `source <path>` line per matched file
//! 3. one `export` per `env` entry, in declaration order
//! 4. `snippet`
//!
//! Any fault discards the whole fragment. A package's `command:` block is
//! compiled separately, behind its own `if`, into exports, aliases and a
//! snippet.
//!
//! ```rust,no_run
//! use afx::config::{AppConfig, Layout};
//! use afx::init::{Compiler, ShellGate};
//!
//! # fn example(packages: &[afx::package::Package]) -> anyhow::Result<()> {
//! let layout = Layout::from_env()?;
//! let compiler = Compiler::new(ShellGate::from_env(&AppConfig::default()), &layout);
//! print!("{}", compiler.script(packages));
//! # Ok(())
//! # }
//! ```

pub mod gate;

pub use gate::{GateError, GateRunner, SHELL_ENV, ShellGate, check, choose_shell};

use std::path::PathBuf;
use thiserror::Error;
use tracing::{trace, warn};

use crate::config::Layout;
use crate::package::{OrderedMap, Package};
use crate::utils::expand_tilde;

/// Why a package contributed nothing to the script.
///
/// These never abort a run; the caller logs them and moves on to the next
/// package.
#[derive(Debug, Error)]
pub enum InitFault {
    #[error("{name}: package is not installed, skipped")]
    NotInstalled { name: String },

    #[error("{name}: `if` condition did not pass ({source})")]
    GateFailed {
        name: String,
        #[source]
        source: GateError,
    },

    #[error("{name}: no source files matched")]
    NoSourceFiles { name: String },
}

/// Progress of a single plugin compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    GateCheck,
    SourceResolve,
    Emit,
    Done,
}

/// Compiles packages into shell code.
#[derive(Debug)]
pub struct Compiler<G: GateRunner> {
    gate: G,
    bin_dir: PathBuf,
}

impl<G: GateRunner> Compiler<G> {
    pub fn new(gate: G, layout: &Layout) -> Self {
        Self {
            gate,
            bin_dir: layout.bin_dir.clone(),
        }
    }

    /// The script for all `packages`, in the given order.
    ///
    /// Faults are logged as warnings and the package is skipped. A package
    /// that is not installed contributes nothing; otherwise its plugin and
    /// command fragments succeed or fail independently.
    pub fn script(&self, packages: &[Package]) -> String {
        let mut script = String::new();
        for pkg in packages {
            if let Err(fault) = self.check_installed(pkg) {
                warn!("{fault}");
                continue;
            }
            match self.plugin_fragment(pkg) {
                Ok(text) => script.push_str(&text),
                Err(fault) => warn!("{fault}"),
            }
            match self.compile_command(pkg) {
                Ok(text) => script.push_str(&text),
                Err(fault) => warn!("{fault}"),
            }
        }
        script
    }

    /// Compiles the plugin fragment of one package.
    ///
    /// A package without a `plugin:` block compiles to an empty string.
    ///
    /// # Errors
    ///
    /// Returns the [`InitFault`] that stopped compilation; no partial output
    /// is returned.
    pub fn compile(&self, pkg: &Package) -> Result<String, InitFault> {
        self.check_installed(pkg)?;
        self.plugin_fragment(pkg)
    }

    fn check_installed(&self, pkg: &Package) -> Result<(), InitFault> {
        trace!("{}: {:?}", pkg.name(), Stage::Start);
        if pkg.installed(&self.bin_dir) {
            Ok(())
        } else {
            Err(InitFault::NotInstalled {
                name: pkg.name().to_string(),
            })
        }
    }

    fn gate(&self, pkg: &Package, condition: &str) -> Result<(), InitFault> {
        trace!("{}: {:?}", pkg.name(), Stage::GateCheck);
        if condition.is_empty() {
            return Ok(());
        }
        check(&self.gate, condition).map_err(|source| InitFault::GateFailed {
            name: pkg.name().to_string(),
            source,
        })
    }

    fn plugin_fragment(&self, pkg: &Package) -> Result<String, InitFault> {
        let Some(plugin) = pkg.plugin() else {
            return Ok(String::new());
        };

        self.gate(pkg, &plugin.condition)?;

        trace!("{}: {:?}", pkg.name(), Stage::SourceResolve);
        let sources = plugin.sources(pkg.home());
        if sources.is_empty() {
            return Err(InitFault::NoSourceFiles {
                name: pkg.name().to_string(),
            });
        }

        trace!("{}: {:?}", pkg.name(), Stage::Emit);
        let mut out = String::new();
        push_block(&mut out, &plugin.snippet_prepare);
        for source in &sources {
            out.push_str(&format!("source {}\n", source.display()));
        }
        push_exports(&mut out, &plugin.env);
        push_block(&mut out, &plugin.snippet);

        trace!("{}: {:?}", pkg.name(), Stage::Done);
        Ok(out)
    }

    /// Compiles the command fragment of one package: exports, aliases and
    /// the command snippet.
    ///
    /// # Errors
    ///
    /// Returns [`InitFault::GateFailed`] if the command's `if` does not pass.
    pub fn compile_command(&self, pkg: &Package) -> Result<String, InitFault> {
        let Some(command) = pkg.command().filter(|c| c.has_init()) else {
            return Ok(String::new());
        };

        self.gate(pkg, &command.condition)?;

        let mut out = String::new();
        push_exports(&mut out, &command.env);
        for (name, value) in command.alias.iter() {
            out.push_str(&format!("alias {name}={}\n", single_quote(value)));
        }
        push_block(&mut out, &command.snippet);
        Ok(out)
    }
}

/// Appends a free-form shell block ending in exactly one newline.
fn push_block(out: &mut String, text: &str) {
    let text = text.trim_end_matches('\n');
    if text.is_empty() {
        return;
    }
    out.push_str(text);
    out.push('\n');
}

fn push_exports(out: &mut String, env: &OrderedMap) {
    for (key, value) in env.iter() {
        out.push_str(&export_line(key, value));
        out.push('\n');
    }
}

/// `PATH` is appended to rather than replaced; every other variable is set
/// to a double-quoted value.
pub fn export_line(key: &str, value: &str) -> String {
    let value = expand_tilde(value);
    if key == "PATH" {
        format!("export PATH=$PATH:{value}")
    } else {
        format!("export {key}={}", double_quote(&value))
    }
}

fn double_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
