//! Core types shared across afx.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`AfxError`] - fatal error classes (config, duplicates, dependency graph)
//! - [`MissingDependency`] - one unresolved `depends-on` entry
//! - [`ErrorContext`] - user-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - convert any error for CLI display
//!
//! ## `kind` - Package Kinds
//!
//! - [`PackageKind`] - GitHub, Gist, Local or HTTP
//!
//! # Examples
//!
//! ```rust
//! use afx::core::{AfxError, ErrorContext};
//!
//! let ctx = ErrorContext::new(AfxError::ConfigNotFound {
//!     path: "~/.config/afx".to_string(),
//! })
//! .with_suggestion("Create a YAML file under ~/.config/afx");
//! assert!(ctx.to_string().contains("Config not found"));
//! ```

pub mod error;
mod kind;

pub use error::{AfxError, ErrorContext, MissingDependency, user_friendly_error};
pub use kind::PackageKind;
