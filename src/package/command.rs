//! The `command:` block: executables a package exposes, plus shell setup
//! that belongs to them.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::OrderedMap;
use crate::pattern;
use crate::utils::join_unless_absolute;

/// A glob-to-target rule for exposing installed files as commands.
///
/// `from` is matched under the package home. `to` is the link name; it is
/// resolved against the bin directory unless absolute, and defaults to the
/// matched file's base name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl Link {
    /// A link that only names its source pattern.
    pub fn from_pattern(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: String::new(),
        }
    }
}

/// A [`Link`] after its pattern has been matched on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Matched file inside the package home.
    pub source: PathBuf,
    /// Where the link is expected to live.
    pub target: PathBuf,
}

/// Commands a package provides.
///
/// ```yaml
/// command:
///   link:
///     - from: "**/fzf"
///   env:
///     FZF_DEFAULT_OPTS: --height 40%
///   alias:
///     ff: fzf --preview 'cat {}'
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Command {
    #[serde(default)]
    pub link: Vec<Link>,
    #[serde(default)]
    pub env: OrderedMap,
    #[serde(default)]
    pub alias: OrderedMap,
    #[serde(default)]
    pub snippet: String,
    /// Shell condition; the command setup is emitted only if it exits 0.
    #[serde(default, rename = "if")]
    pub condition: String,
}

impl Command {
    /// Declared links, before any filesystem lookup.
    pub fn declared_links(&self) -> &[Link] {
        &self.link
    }

    /// Matches every link pattern under `home` and computes its target.
    pub fn links(&self, home: &Path, bin_dir: &Path) -> Vec<ResolvedLink> {
        let mut resolved = Vec::new();
        for link in &self.link {
            for source in pattern::glob(&join_unless_absolute(home, &link.from)) {
                let target = if link.to.is_empty() {
                    match source.file_name() {
                        Some(name) => bin_dir.join(name),
                        None => continue,
                    }
                } else {
                    join_unless_absolute(bin_dir, &link.to)
                };
                resolved.push(ResolvedLink {
                    source,
                    target,
                });
            }
        }
        resolved
    }

    /// True when there is at least one link, every link pattern matches, and
    /// every link target exists.
    pub fn installed(&self, home: &Path, bin_dir: &Path) -> bool {
        if self.link.is_empty() {
            return false;
        }
        let every_pattern_matches = self
            .link
            .iter()
            .all(|link| !pattern::glob(&join_unless_absolute(home, &link.from)).is_empty());
        every_pattern_matches && self.links(home, bin_dir).iter().all(|link| link.target.exists())
    }

    /// Whether the block adds anything to the init script.
    pub fn has_init(&self) -> bool {
        !self.env.is_empty() || !self.alias.is_empty() || !self.snippet.is_empty()
    }
}
