//! Config file handling for afx.
//!
//! Packages are declared in one or more YAML files. Each file is a document
//! with up to four package lists and an optional `config:` block:
//!
//! ```yaml
//! github:
//!   - name: b4b4r07/enhancd
//!     owner: b4b4r07
//!     repo: enhancd
//!     plugin:
//!       sources: [init.sh]
//!   - name: junegunn/fzf
//!     owner: junegunn
//!     repo: fzf
//!     release:
//!       name: fzf
//!       tag: 0.44.1
//!
//! gist:
//!   - name: hello
//!     owner: b4b4r07
//!     id: 2d7a2e9a8b6e5d0a
//!
//! local:
//!   - name: dotfiles
//!     directory: ~/src/dotfiles
//!     plugin:
//!       sources: ["zsh/*.zsh"]
//!     depends-on: [b4b4r07/enhancd]
//!
//! http:
//!   - name: git-prompt
//!     url: https://raw.githubusercontent.com/git/git/master/contrib/completion/git-prompt.sh
//!
//! config:
//!   shell: zsh
//! ```
//!
//! # Loading
//!
//! [`load`] reads a single file or every `.yaml` / `.yml` file under a
//! directory (sorted by path). Decoding is strict: unknown fields and
//! duplicate keys are errors. Each decoded file then passes
//! [`validation::validate_schema`] before it is merged: package lists are
//! concatenated in file order and `config:` blocks override earlier ones
//! field by field.
//!
//! # Normalizing
//!
//! [`normalize::parse`] flattens a [`Config`] into one package list in a
//! fixed order (GitHub, Gist, Local, HTTP) and fills in the default command
//! link for GitHub releases. [`validation::validate`] then rejects
//! duplicated package names.

mod manifest_io;
pub mod normalize;
pub mod validation;

pub use manifest_io::{LoadedConfig, load, read, walk_dir};
pub use normalize::parse;
pub use validation::{validate, validate_schema};

use serde::Deserialize;

use crate::config::AppConfigOverrides;
use crate::package::{Gist, GitHub, Http, Local};

/// One decoded config document, or several merged together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub github: Vec<GitHub>,
    #[serde(default)]
    pub gist: Vec<Gist>,
    #[serde(default)]
    pub local: Vec<Local>,
    #[serde(default)]
    pub http: Vec<Http>,
    /// Settings for afx itself.
    #[serde(default)]
    pub config: Option<AppConfigOverrides>,
}

impl Config {
    /// Number of packages across all lists.
    pub fn package_count(&self) -> usize {
        self.github.len() + self.gist.len() + self.local.len() + self.http.len()
    }

    /// Appends `other`'s packages after this config's own.
    ///
    /// `other.config` is dropped; [`load`] applies each file's `config:`
    /// block to [`LoadedConfig::app`] as it goes.
    pub fn extend(&mut self, other: Self) {
        self.github.extend(other.github);
        self.gist.extend(other.gist);
        self.local.extend(other.local);
        self.http.extend(other.http);
    }
}
