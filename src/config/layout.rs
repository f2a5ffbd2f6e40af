//! On-disk layout: where package homes and command links live.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::utils::{expand_path, get_home_dir};

/// Environment variable overriding [`Layout::root`].
pub const ROOT_ENV: &str = "AFX_ROOT";
/// Environment variable overriding [`Layout::bin_dir`].
pub const BIN_DIR_ENV: &str = "AFX_BIN_DIR";
/// Environment variable overriding the config search path.
pub const CONFIG_PATH_ENV: &str = "AFX_CONFIG_PATH";

/// Directories afx reads installed packages from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Parent of remote package homes (`~/.afx`).
    pub root: PathBuf,
    /// Where command links point from (`~/bin`).
    pub bin_dir: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bin_dir: bin_dir.into(),
        }
    }

    /// Builds the layout from `AFX_ROOT` / `AFX_BIN_DIR`, falling back to
    /// `~/.afx` and `~/bin`.
    ///
    /// # Errors
    ///
    /// Returns an error if a fallback is needed and the home directory cannot
    /// be determined.
    pub fn from_env() -> Result<Self> {
        let root = match non_empty_var(ROOT_ENV) {
            Some(root) => expand_path(&root),
            None => get_home_dir()?.join(".afx"),
        };
        let bin_dir = match non_empty_var(BIN_DIR_ENV) {
            Some(bin) => expand_path(&bin),
            None => get_home_dir()?.join("bin"),
        };
        Ok(Self::new(root, bin_dir))
    }
}

/// Default location searched for config files: `$AFX_CONFIG_PATH`, else
/// `~/.config/afx`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    match non_empty_var(CONFIG_PATH_ENV) {
        Some(path) => Ok(expand_path(&path)),
        None => Ok(get_home_dir()?.join(".config").join("afx")),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
