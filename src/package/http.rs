//! Packages downloaded from a plain HTTP(S) URL.

use serde::Deserialize;
use std::path::PathBuf;

use super::{Command, PackageSource, Plugin};
use crate::config::Layout;
use crate::core::PackageKind;

/// A single file fetched from `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Http {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plugin: Option<Plugin>,
    #[serde(default)]
    pub command: Option<Command>,
    #[serde(default, rename = "depends-on")]
    pub depends_on: Vec<String>,
}

/// `https://host/a/b/file.sh` -> `host/a/b`
fn url_dir(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let trimmed = without_scheme.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((dir, _file)) => dir,
        None => trimmed,
    }
}

impl PackageSource for Http {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PackageKind {
        PackageKind::Http
    }

    fn home(&self, layout: &Layout) -> PathBuf {
        layout.root.join(url_dir(&self.url))
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
