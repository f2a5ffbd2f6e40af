//! Test environment builder for simplified test setup
//!
//! Lays out a throwaway root directory, bin directory and config directory,
//! so tests can describe packages in YAML and the files they "installed".

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{BIN_DIR_ENV, CONFIG_PATH_ENV, Layout, ROOT_ENV};

/// A builder for creating test environments with a fluent API
pub struct TestEnvironmentBuilder {
    temp_dir: TempDir,
    configs: Vec<(String, String)>,
    files: Vec<(PathBuf, String)>,
}

impl TestEnvironmentBuilder {
    /// Create a new test environment builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            configs: Vec::new(),
            files: Vec::new(),
        })
    }

    /// Add a config file, relative to the config directory
    pub fn with_config(mut self, name: impl Into<String>, yaml: impl Into<String>) -> Self {
        self.configs.push((name.into(), yaml.into()));
        self
    }

    /// Add a file relative to the package root (e.g.
    /// `github.com/owner/repo/init.sh`)
    pub fn with_package_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.files.push((PathBuf::from("root").join(path), content.into()));
        self
    }

    /// Add a file relative to the bin directory
    pub fn with_bin_file(mut self, name: impl AsRef<Path>) -> Self {
        self.files.push((PathBuf::from("bin").join(name), String::new()));
        self
    }

    /// Add a file relative to the temp directory itself, e.g. for local
    /// packages
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.files.push((path.as_ref().to_path_buf(), content.into()));
        self
    }

    /// Build the test environment
    pub fn build(self) -> Result<TestEnvironment> {
        let base = self.temp_dir.path().to_path_buf();
        let env = TestEnvironment {
            root: base.join("root"),
            bin_dir: base.join("bin"),
            config_dir: base.join("config"),
            base,
            _temp_dir: self.temp_dir,
        };
        fs::create_dir_all(&env.root)?;
        fs::create_dir_all(&env.bin_dir)?;
        fs::create_dir_all(&env.config_dir)?;

        for (name, yaml) in &self.configs {
            env.write(&env.config_dir.join(name), yaml)?;
        }
        for (path, content) in &self.files {
            env.write(&env.base.join(path), content)?;
        }
        Ok(env)
    }
}

/// A built test environment
pub struct TestEnvironment {
    _temp_dir: TempDir, // Keep temp dir alive
    /// Temp directory holding everything below
    pub base: PathBuf,
    /// Package root (`AFX_ROOT`)
    pub root: PathBuf,
    /// Command link directory (`AFX_BIN_DIR`)
    pub bin_dir: PathBuf,
    /// Config directory (`AFX_CONFIG_PATH`)
    pub config_dir: PathBuf,
}

impl TestEnvironment {
    /// Layout pointing at this environment's directories
    pub fn layout(&self) -> Layout {
        Layout::new(&self.root, &self.bin_dir)
    }

    /// Environment variables that point afx at this environment
    pub fn env_vars(&self) -> [(&'static str, &Path); 3] {
        [
            (ROOT_ENV, self.root.as_path()),
            (BIN_DIR_ENV, self.bin_dir.as_path()),
            (CONFIG_PATH_ENV, self.config_dir.as_path()),
        ]
    }

    /// Write a file, creating parent directories
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}
