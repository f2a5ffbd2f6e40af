//! Test utilities for afx
//!
//! Helpers for unit and integration tests: one-time logging setup and a
//! builder for isolated directory layouts.
//!
//! # Example
//!
//! ```rust,no_run
//! use afx::test_utils::TestEnvironmentBuilder;
//!
//! let env = TestEnvironmentBuilder::new()
//!     .unwrap()
//!     .with_config("main.yaml", "github:\n  - {name: x, owner: o, repo: x}\n")
//!     .with_package_file("github.com/o/x/init.sh", "")
//!     .build()
//!     .unwrap();
//! assert!(env.root.join("github.com/o/x/init.sh").exists());
//! ```

pub mod builder;

pub use builder::{TestEnvironment, TestEnvironmentBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
