//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`platform`] - home directory, tilde expansion, executable lookup

pub mod platform;

pub use platform::{command_exists, expand_path, expand_tilde, get_home_dir, join_unless_absolute};
