//! Application settings (`config:` block).
//!
//! The `config:` block tunes afx itself rather than describing packages. It
//! is optional in every file; values the user sets override
//! [`AppConfig::default`] field by field, and a later file overrides an
//! earlier one the same way.
//!
//! ```yaml
//! config:
//!   shell: zsh
//!   filter:
//!     command: sk
//!     args: [--ansi]
//! ```

use serde::{Deserialize, Serialize};

use crate::package::OrderedMap;

/// Effective application settings after defaults and overrides are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Shell used to run `if` conditions when `AFX_SHELL` is unset.
    pub shell: String,
    /// Fuzzy finder used for interactive package selection.
    pub filter: Filter,
}

/// Command-line fuzzy finder, e.g. fzf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub command: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub env: OrderedMap,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            filter: Filter {
                command: "fzf".to_string(),
                args: ["--ansi", "--no-preview", "--height=50%", "--reverse"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                env: OrderedMap::new(),
            },
        }
    }
}

/// The `config:` block as written by the user; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfigOverrides {
    #[serde(default)]
    pub shell: Option<String>,
    #[serde(default)]
    pub filter: Option<FilterOverrides>,
}

/// The `config.filter:` block as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterOverrides {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub env: Option<OrderedMap>,
}

impl AppConfig {
    /// Applies user overrides on top of the current values.
    ///
    /// Empty strings count as unset so that `shell: ""` keeps the default.
    pub fn merge(&mut self, overrides: &AppConfigOverrides) {
        if let Some(shell) = overrides.shell.as_deref().filter(|s| !s.is_empty()) {
            self.shell = shell.to_string();
        }
        if let Some(filter) = &overrides.filter {
            if let Some(command) = filter.command.as_deref().filter(|s| !s.is_empty()) {
                self.filter.command = command.to_string();
            }
            if let Some(args) = &filter.args {
                self.filter.args.clone_from(args);
            }
            if let Some(env) = &filter.env {
                self.filter.env.clone_from(env);
            }
        }
    }
}
