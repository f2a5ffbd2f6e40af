//! Show the effective settings.
//!
//! Prints, as YAML, what afx would use after defaults, every `config:` block
//! and the environment are combined:
//!
//! ```bash
//! afx config
//! AFX_SHELL=zsh afx config
//! ```

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::common::CommandContext;
use crate::config::Filter;
use crate::init::ShellGate;

/// Command to show the effective configuration.
#[derive(Args, Debug, Default)]
pub struct ConfigCommand {}

/// Settings in effect for this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    /// Shell that runs `if` conditions
    pub shell: String,
    pub filter: Filter,
    pub root: PathBuf,
    #[serde(rename = "bin-dir")]
    pub bin_dir: PathBuf,
    /// Config files that were read, in merge order
    pub files: Vec<PathBuf>,
}

impl ConfigCommand {
    /// Prints the effective configuration as YAML.
    ///
    /// # Errors
    ///
    /// Fails if the config cannot be loaded.
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let effective = Self::effective(&CommandContext::load(config_path)?);
        print!("{}", serde_yaml::to_string(&effective)?);
        Ok(())
    }

    pub fn effective(ctx: &CommandContext) -> EffectiveConfig {
        let gate = ShellGate::from_env(&ctx.loaded.app);
        EffectiveConfig {
            shell: gate.shell().to_string(),
            filter: ctx.loaded.app.filter.clone(),
            root: ctx.layout.root.clone(),
            bin_dir: ctx.layout.bin_dir.clone(),
            files: ctx.loaded.files.clone(),
        }
    }
}
