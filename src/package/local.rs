//! Packages that already exist on the local filesystem.

use serde::Deserialize;
use std::path::PathBuf;

use super::{Command, PackageSource, Plugin};
use crate::config::Layout;
use crate::core::PackageKind;
use crate::utils::expand_path;

/// A package living in a user-managed directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Local {
    pub name: String,
    /// Package home; `~` is expanded.
    pub directory: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plugin: Option<Plugin>,
    #[serde(default)]
    pub command: Option<Command>,
    #[serde(default, rename = "depends-on")]
    pub depends_on: Vec<String>,
}

impl PackageSource for Local {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PackageKind {
        PackageKind::Local
    }

    fn home(&self, _layout: &Layout) -> PathBuf {
        expand_path(&self.directory)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    fn plugin(&self) -> Option<&Plugin> {
        self.plugin.as_ref()
    }

    fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::get_home_dir;

    #[test]
    fn test_home_expands_tilde_and_ignores_root() {
        let local = Local {
            name: "zsh".to_string(),
            directory: "~/.zsh".to_string(),
            ..Default::default()
        };
        let layout = Layout::new("/r", "/b");
        assert_eq!(local.home(&layout), get_home_dir().unwrap().join(".zsh"));
    }
}
