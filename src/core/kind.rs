//! Package source kinds.
//!
//! Every configured package comes from exactly one kind of source. The kind
//! decides where the package home lives and which config list it was read
//! from; everything else about a package is shared across kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source kind of a package.
///
/// Serializes as the lowercase config key (`github`, `gist`, `local`, `http`).
///
/// ```rust
/// use afx::core::PackageKind;
///
/// let kind: PackageKind = "GitHub".parse().unwrap();
/// assert_eq!(kind, PackageKind::GitHub);
/// assert_eq!(kind.to_string(), "github");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Repository on github.com, optionally with a release asset
    #[serde(rename = "github")]
    GitHub,
    /// Gist on gist.github.com
    Gist,
    /// Directory already present on the local filesystem
    Local,
    /// Single file downloaded over HTTP(S)
    Http,
}

impl PackageKind {
    /// All kinds, in the order their config lists are flattened.
    pub const ALL: [Self; 4] = [Self::GitHub, Self::Gist, Self::Local, Self::Http];

    /// The config key this kind is read from.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Gist => "gist",
            Self::Local => "local",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

impl FromStr for PackageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.config_key() == lower)
            .ok_or_else(|| anyhow::anyhow!("Unknown package kind: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_order() {
        assert_eq!(
            PackageKind::ALL,
            [PackageKind::GitHub, PackageKind::Gist, PackageKind::Local, PackageKind::Http]
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("HTTP".parse::<PackageKind>().unwrap(), PackageKind::Http);
        assert_eq!("gist".parse::<PackageKind>().unwrap(), PackageKind::Gist);
        assert!("svn".parse::<PackageKind>().is_err());
    }

    #[test]
    fn test_serde_uses_config_key() {
        assert_eq!(serde_json::to_string(&PackageKind::GitHub).unwrap(), "\"github\"");
        let kind: PackageKind = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(kind, PackageKind::Local);
    }
}
