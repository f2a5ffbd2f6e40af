//! Running `if` conditions.
//!
//! A gate is a shell snippet that decides whether a package's setup is
//! emitted. The compiler only sees [`GateRunner`], so tests can swap the
//! real shell for a fixed answer.

use std::env;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;

/// Environment variable selecting the shell that runs conditions.
pub const SHELL_ENV: &str = "AFX_SHELL";

/// Runs a shell condition and reports its exit code.
pub trait GateRunner {
    /// Runs `condition` to completion.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the shell could not be started.
    fn run_gate(&self, condition: &str) -> io::Result<i32>;
}

/// Why a gate did not pass.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("exited with status {0}")]
    Exit(i32),
    #[error("failed to run shell: {0}")]
    Spawn(#[from] io::Error),
}

/// Runs `condition` through `runner`; only exit status 0 passes.
///
/// # Errors
///
/// Returns [`GateError::Exit`] for a non-zero status and
/// [`GateError::Spawn`] if the shell could not be started.
pub fn check(runner: &impl GateRunner, condition: &str) -> Result<(), GateError> {
    match runner.run_gate(condition)? {
        0 => Ok(()),
        code => Err(GateError::Exit(code)),
    }
}

/// Gate runner that executes `<shell> -c <condition>`.
///
/// The child's stdout and stderr are discarded so nothing leaks into the
/// generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellGate {
    shell: String,
}

impl ShellGate {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Uses `$AFX_SHELL`, falling back to the configured shell.
    pub fn from_env(app: &AppConfig) -> Self {
        let from_env = env::var(SHELL_ENV).ok();
        Self::new(choose_shell(from_env.as_deref(), &app.shell))
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl GateRunner for ShellGate {
    fn run_gate(&self, condition: &str) -> io::Result<i32> {
        debug!("Running condition with {}: {condition}", self.shell);
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(condition)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        // killed by a signal: no code, never a pass
        Ok(status.code().unwrap_or(-1))
    }
}

/// Picks the gate shell: a non-empty `env_shell`, else a non-empty
/// `configured`, else `bash`.
pub fn choose_shell(env_shell: Option<&str>, configured: &str) -> String {
    env_shell
        .filter(|s| !s.is_empty())
        .or(Some(configured).filter(|s| !s.is_empty()))
        .unwrap_or("bash")
        .to_string()
}
