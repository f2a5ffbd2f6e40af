//! Configuration of afx itself.
//!
//! Two things live here, both independent of which packages are configured:
//!
//! - [`AppConfig`] - settings from the optional `config:` block, merged over
//!   built-in defaults
//! - [`Layout`] - directories where package homes and command links live
//!
//! # Environment
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `AFX_CONFIG_PATH` | `~/.config/afx` | config file or directory |
//! | `AFX_ROOT` | `~/.afx` | root of remote package homes |
//! | `AFX_BIN_DIR` | `~/bin` | target directory for command links |
//! | `AFX_SHELL` | `config.shell` | shell running `if` conditions |

mod app;
mod layout;

pub use app::{AppConfig, AppConfigOverrides, Filter, FilterOverrides};
pub use layout::{BIN_DIR_ENV, CONFIG_PATH_ENV, Layout, ROOT_ENV, default_config_path};
