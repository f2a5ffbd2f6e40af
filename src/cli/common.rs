//! Common utilities for CLI commands

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Layout, default_config_path};
use crate::manifest::{self, LoadedConfig};
use crate::package::Package;

/// Common context for commands that read the package configuration.
#[derive(Debug)]
pub struct CommandContext {
    /// Config path that was loaded (file or directory)
    pub config_path: PathBuf,
    /// Decoded and merged config files
    pub loaded: LoadedConfig,
    /// Where package homes and command links live
    pub layout: Layout,
    /// Normalized packages in config order
    pub packages: Vec<Package>,
}

impl CommandContext {
    /// Loads the config at `config_path`, or the default location when
    /// `None`, and normalizes it into packages.
    ///
    /// # Errors
    ///
    /// Propagates loader errors (missing path, bad YAML, schema violations)
    /// and failures to determine the home directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        debug!("Loading config from {}", config_path.display());

        let loaded = manifest::load(&config_path)?;
        let layout = Layout::from_env()?;
        let packages = manifest::parse(&loaded.config, &layout);
        debug!("{} package(s) configured", packages.len());

        Ok(Self {
            config_path,
            loaded,
            layout,
            packages,
        })
    }
}
