//! The package model.
//!
//! A package is one configured unit: something afx knows how to find on
//! disk and load into the shell. Packages come from four kinds of source
//! ([`GitHub`], [`Gist`], [`Local`], [`Http`]). The kinds differ only in the
//! fields that say where the package comes from; everything the resolver and
//! the init compiler need is exposed through [`PackageSource`] and, once a
//! [`Layout`] fixes the home directory, through [`Package`].
//!
//! # Examples
//!
//! ```rust
//! use afx::config::Layout;
//! use afx::package::{GitHub, Package};
//! use std::path::Path;
//!
//! let layout = Layout::new("/home/me/.afx", "/home/me/bin");
//! let pkg = Package::new(
//!     GitHub {
//!         name: "enhancd".to_string(),
//!         owner: "b4b4r07".to_string(),
//!         repo: "enhancd".to_string(),
//!         ..Default::default()
//!     },
//!     &layout,
//! );
//! assert_eq!(pkg.name(), "enhancd");
//! assert_eq!(pkg.home(), Path::new("/home/me/.afx/github.com/b4b4r07/enhancd"));
//! ```

mod command;
mod gist;
mod github;
mod http;
mod local;
mod ordered_map;
mod plugin;

pub use command::{Command, Link, ResolvedLink};
pub use gist::Gist;
pub use github::{GitHub, Release};
pub use http::Http;
pub use local::Local;
pub use ordered_map::OrderedMap;
pub use plugin::Plugin;

use std::path::{Path, PathBuf};

use crate::config::Layout;
use crate::core::PackageKind;

/// Capabilities shared by every package source.
pub trait PackageSource {
    /// Unique package name.
    fn name(&self) -> &str;

    fn kind(&self) -> PackageKind;

    /// Directory holding the package's files under `layout`.
    fn home(&self, layout: &Layout) -> PathBuf;

    fn description(&self) -> &str;

    /// Names of packages that must load before this one.
    fn depends_on(&self) -> &[String];

    fn plugin(&self) -> Option<&Plugin>;

    fn command(&self) -> Option<&Command>;

    /// Only GitHub packages can have a release block.
    fn release(&self) -> Option<&Release> {
        None
    }
}

/// Where a package comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    GitHub(GitHub),
    Gist(Gist),
    Local(Local),
    Http(Http),
}

impl Source {
    fn inner(&self) -> &dyn PackageSource {
        match self {
            Self::GitHub(pkg) => pkg,
            Self::Gist(pkg) => pkg,
            Self::Local(pkg) => pkg,
            Self::Http(pkg) => pkg,
        }
    }
}

impl From<GitHub> for Source {
    fn from(pkg: GitHub) -> Self {
        Self::GitHub(pkg)
    }
}

impl From<Gist> for Source {
    fn from(pkg: Gist) -> Self {
        Self::Gist(pkg)
    }
}

impl From<Local> for Source {
    fn from(pkg: Local) -> Self {
        Self::Local(pkg)
    }
}

impl From<Http> for Source {
    fn from(pkg: Http) -> Self {
        Self::Http(pkg)
    }
}

/// A configured package with its home directory fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    source: Source,
    home: PathBuf,
}

impl Package {
    /// Wraps a source, computing its home under `layout`.
    pub fn new(source: impl Into<Source>, layout: &Layout) -> Self {
        let source = source.into();
        let home = source.inner().home(layout);
        Self {
            source,
            home,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn name(&self) -> &str {
        self.source.inner().name()
    }

    pub fn kind(&self) -> PackageKind {
        self.source.inner().kind()
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn description(&self) -> &str {
        self.source.inner().description()
    }

    pub fn depends_on(&self) -> &[String] {
        self.source.inner().depends_on()
    }

    pub fn plugin(&self) -> Option<&Plugin> {
        self.source.inner().plugin()
    }

    pub fn command(&self) -> Option<&Command> {
        self.source.inner().command()
    }

    pub fn release(&self) -> Option<&Release> {
        self.source.inner().release()
    }

    /// Whether the package's files are present.
    ///
    /// Every block the package declares must be satisfied: the plugin's
    /// source patterns must all match, and the command's links must all
    /// exist under `bin_dir`. A package with neither block is installed
    /// when its home directory exists.
    pub fn installed(&self, bin_dir: &Path) -> bool {
        let plugin = self.plugin();
        let command = self.command();
        if plugin.is_none() && command.is_none() {
            return self.home.is_dir();
        }
        plugin.is_none_or(|p| p.installed(&self.home))
            && command.is_none_or(|c| c.installed(&self.home, bin_dir))
    }
}
