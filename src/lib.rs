//! afx - declarative package manager for shell plugins and commands
//!
//! Packages are described in YAML: where they come from (a GitHub
//! repository or release, a Gist, a local directory, a URL), which of their
//! files the shell should load, which executables they expose, and which
//! other packages they need. afx turns that description into a shell script
//! that loads everything in dependency order.
//!
//! # Architecture Overview
//!
//! ```text
//! YAML files ─> manifest::load ─> manifest::parse ─> [Package]
//!                                                       │
//!                              manifest::validate (unique names)
//!                                                       │
//!                              resolver::sort (load order) ─> init::Compiler ─> script
//! ```
//!
//! Installation itself happens outside afx; the core only inspects what is
//! on disk under the package homes and the bin directory.
//!
//! # Core Modules
//!
//! - [`package`] - the package model shared by every source kind
//! - [`manifest`] - config discovery, strict decoding, normalization and
//!   validation
//! - [`resolver`] - dependency ordering, missing-dependency and cycle
//!   detection
//! - [`init`] - per-package compilation into shell code, with `if` gates
//! - [`pattern`] - shell glob and recursive super-glob matching
//!
//! # Supporting Modules
//!
//! - [`cli`] - command-line interface
//! - [`config`] - application settings and on-disk layout
//! - [`core`] - error types and user-facing error rendering
//! - [`utils`] - home directory and path helpers
//!
//! # Example
//!
//! ```yaml
//! # ~/.config/afx/main.yaml
//! github:
//!   - name: zsh-users/zsh-autosuggestions
//!     owner: zsh-users
//!     repo: zsh-autosuggestions
//!     plugin:
//!       sources: [zsh-autosuggestions.zsh]
//!       env:
//!         ZSH_AUTOSUGGEST_HIGHLIGHT_STYLE: fg=8
//! ```
//!
//! ```bash
//! source <(afx init)
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod init;
pub mod manifest;
pub mod package;
pub mod pattern;
pub mod resolver;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
