//! Packages hosted in a GitHub repository.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

use super::{Command, Link, PackageSource, Plugin};
use crate::config::Layout;
use crate::core::PackageKind;

/// A GitHub release asset to download instead of cloning the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Release {
    /// Asset name, e.g. `bat-v0.24.0-x86_64-unknown-linux-gnu.tar.gz`.
    pub name: String,
    pub tag: String,
}

/// A package cloned from `github.com/<owner>/<repo>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHub {
    pub name: String,
    pub owner: String,
    pub repo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub release: Option<Release>,
    #[serde(default)]
    pub plugin: Option<Plugin>,
    #[serde(default)]
    pub command: Option<Command>,
    #[serde(default, rename = "depends-on")]
    pub depends_on: Vec<String>,
}

impl GitHub {
    /// Gives a release package a default link when it declares none.
    ///
    /// A package with a `release` and no declared links gets exactly one
    /// link, `**/<release.name>`. Packages that already declare links (or
    /// were already augmented) are left alone. Returns whether a link was
    /// added.
    pub fn apply_release_link(&mut self) -> bool {
        let Some(release) = &self.release else {
            return false;
        };
        let links = vec![Link::from_pattern(format!("**/{}", release.name))];
        match &mut self.command {
            Some(command) if !command.declared_links().is_empty() => return false,
            Some(command) => command.link = links,
            None => {
                self.command = Some(Command {
                    link: links,
                    ..Default::default()
                });
            }
        }
        debug!(
            "{}: added '**/{}' to link.from to complete missing links in github release",
            self.name, release.name
        );
        true
    }
}

impl PackageSource for GitHub {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PackageKind {
        PackageKind::GitHub
    }

    fn home(&self, layout: &Layout) -> PathBuf {
        layout.root.join("github.com").join(&self.owner).join(&self.repo)
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

    fn release(&self) -> Option<&Release> {
        self.release.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release_pkg(command: Option<Command>) -> GitHub {
        GitHub {
            name: "bar".to_string(),
            owner: "foo".to_string(),
            repo: "bar".to_string(),
            release: Some(Release {
                name: "bar_linux_amd64.tar.gz".to_string(),
                tag: "v1.0.0".to_string(),
            }),
            command,
            ..Default::default()
        }
    }

    #[test]
    fn test_release_without_command_gets_link() {
        let mut pkg = release_pkg(None);
        assert!(pkg.apply_release_link());
        assert_eq!(
            pkg.command.unwrap().link,
            vec![Link::from_pattern("**/bar_linux_amd64.tar.gz")]
        );
    }

    #[test]
    fn test_release_with_empty_links_keeps_other_fields() {
        let mut command = Command::default();
        command.alias.insert("b", "bar");
        let mut pkg = release_pkg(Some(command));
        assert!(pkg.apply_release_link());

        let command = pkg.command.unwrap();
        assert_eq!(command.link.len(), 1);
        assert_eq!(command.alias.get("b"), Some("bar"));
    }

    #[test]
    fn test_declared_links_are_kept() {
        let command = Command {
            link: vec![Link::from_pattern("bin/bar")],
            ..Default::default()
        };
        let mut pkg = release_pkg(Some(command.clone()));
        assert!(!pkg.apply_release_link());
        assert_eq!(pkg.command, Some(command));
    }

    #[test]
    fn test_release_link_is_idempotent() {
        let mut pkg = release_pkg(None);
        pkg.apply_release_link();
        let once = pkg.clone();
        assert!(!pkg.apply_release_link());
        assert_eq!(pkg, once);
    }

    #[test]
    fn test_no_release_no_change() {
        let mut pkg = GitHub {
            name: "x".to_string(),
            ..Default::default()
        };
        assert!(!pkg.apply_release_link());
        assert!(pkg.command.is_none());
    }

    #[test]
    fn test_home() {
        let pkg = release_pkg(None);
        let layout = Layout::new("/r", "/b");
        assert_eq!(pkg.home(&layout), PathBuf::from("/r/github.com/foo/bar"));
    }
}
