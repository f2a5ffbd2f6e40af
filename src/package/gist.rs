//! Packages published as a GitHub Gist.

use serde::Deserialize;
use std::path::PathBuf;

use super::{Command, PackageSource, Plugin};
use crate::config::Layout;
use crate::core::PackageKind;

/// A package cloned from `gist.github.com/<owner>/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Gist {
    pub name: String,
    pub owner: String,
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plugin: Option<Plugin>,
    #[serde(default)]
    pub command: Option<Command>,
    #[serde(default, rename = "depends-on")]
    pub depends_on: Vec<String>,
}

impl PackageSource for Gist {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PackageKind {
        PackageKind::Gist
    }

    fn home(&self, layout: &Layout) -> PathBuf {
        layout.root.join("gist.github.com").join(&self.owner).join(&self.id)
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

    #[test]
    fn test_decode_and_home() {
        let gist: Gist =
            serde_yaml::from_str("name: gist-x\nowner: someone\nid: 4d8e1a\n").unwrap();
        let layout = Layout::new("/r", "/b");
        assert_eq!(gist.home(&layout), PathBuf::from("/r/gist.github.com/someone/4d8e1a"));
        assert!(gist.depends_on().is_empty());
    }
}
