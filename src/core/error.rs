//! Error handling for afx
//!
//! This module provides the error types shared by the loader, validator and
//! resolver, plus the user-facing renderer used by the CLI. It follows two
//! rules:
//! 1. **Strongly-typed errors** ([`AfxError`]) so callers can match on the
//!    failure class (a cycle is not a duplicate is not a bad schema)
//! 2. **User-friendly messages** ([`ErrorContext`]) with a suggestion where one
//!    applies
//!
//! Per-package faults raised while compiling the init script live next to the
//! compiler in [`crate::init::InitFault`]; they are never fatal for a run.
//!
//! # Examples
//!
//! ```rust,no_run
//! use afx::core::{AfxError, user_friendly_error};
//!
//! let error = AfxError::DuplicatePackages {
//!     names: vec!["zsh-z".to_string()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// One `depends-on` entry that does not name any configured package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDependency {
    /// The name listed in `depends-on`.
    pub dependency: String,
    /// The package that declared the dependency.
    pub package: String,
    /// Closest configured package name, if any is similar enough.
    pub suggestion: Option<String>,
}

impl fmt::Display for MissingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: not a valid package name in depends-on of {}",
            self.dependency, self.package
        )?;
        if let Some(similar) = &self.suggestion {
            write!(f, " (did you mean {similar:?}?)")?;
        }
        Ok(())
    }
}

fn join_missing(missing: &[MissingDependency]) -> String {
    missing.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

fn join_reasons(reasons: &[String]) -> String {
    reasons.iter().map(|r| format!("\n  - {r}")).collect()
}

/// The main error type for afx operations.
///
/// # Error Categories
///
/// ## Configuration
/// - [`ConfigNotFound`](Self::ConfigNotFound) - no config file or directory at the path
/// - [`ConfigParseError`](Self::ConfigParseError) - YAML did not decode (syntax, unknown or duplicate keys)
/// - [`SchemaError`](Self::SchemaError) - decoded fine but violates field rules
///
/// ## Package Set
/// - [`DuplicatePackages`](Self::DuplicatePackages) - the same name is configured more than once
/// - [`MissingDependencies`](Self::MissingDependencies) - `depends-on` names unknown packages
/// - [`CircularDependency`](Self::CircularDependency) - `depends-on` forms a cycle
#[derive(Error, Debug, Clone)]
pub enum AfxError {
    /// Config path does not exist
    #[error("Config not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// YAML could not be decoded into the config schema
    #[error("Invalid config file syntax in {file}: {reason}")]
    ConfigParseError {
        /// File being decoded
        file: String,
        /// Decoder message
        reason: String,
    },

    /// Decoded config violates field-level rules
    #[error("Config validation failed in {file}:{}", join_reasons(.reasons))]
    SchemaError {
        /// File being validated
        file: String,
        /// Every rule that failed
        reasons: Vec<String>,
    },

    /// Package names are repeated; one entry per repeat beyond the first
    #[error("duplicated packages: [{}]", .names.join(","))]
    DuplicatePackages {
        /// Repeated names in encounter order
        names: Vec<String>,
    },

    /// Dependencies that name no configured package
    #[error("missing dependencies: {}", join_missing(.missing))]
    MissingDependencies {
        /// All violations, in package order
        missing: Vec<MissingDependency>,
    },

    /// The dependency graph has a cycle; no ordering exists
    #[error("Circular dependency detected: {chain}")]
    CircularDependency {
        /// The cycle, e.g. `a → b → a`
        chain: String,
        /// Missing-dependency violations found in the same graph
        missing: Vec<MissingDependency>,
    },

    /// Filesystem failure
    #[error("File system error: {operation}: {path}")]
    FileSystemError {
        /// What was being done
        operation: String,
        /// Path involved
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **Error**: the main message in red
/// 2. **Details**: extra context in yellow (optional)
/// 3. **Suggestion**: what to do next in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying afx error
    pub error: AfxError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: AfxError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// [`AfxError`] values get tailored suggestions; I/O errors get filesystem
/// guidance; anything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(afx_error) = error.downcast_ref::<AfxError>() {
        return create_error_context(afx_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::new(AfxError::FileSystemError {
            operation: "file access".to_string(),
            path: "unknown".to_string(),
        })
        .with_suggestion("Check file ownership and permissions of the config and package directories");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(AfxError::Other {
        message,
    })
}

fn create_error_context(error: AfxError) -> ErrorContext {
    match &error {
        AfxError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass --config <PATH> or set AFX_CONFIG_PATH to a YAML file or directory")
            .with_details("afx reads every .yaml/.yml file under ~/.config/afx by default"),
        AfxError::ConfigParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check indentation and field names; unknown and repeated keys are rejected"),
        AfxError::SchemaError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fill in the required fields listed above"),
        AfxError::DuplicatePackages {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Rename or remove the repeated packages; names must be unique across all config files"),
        AfxError::MissingDependencies {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Add the missing packages or fix the names in depends-on"),
        AfxError::CircularDependency {
            missing,
            ..
        } => {
            let mut ctx = ErrorContext::new(error.clone())
                .with_suggestion("Remove one of the depends-on entries that form the cycle");
            if !missing.is_empty() {
                ctx = ctx.with_details(join_missing(missing));
            }
            ctx
        }
        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_joins_with_comma() {
        let error = AfxError::DuplicatePackages {
            names: vec!["foo".to_string(), "foo".to_string(), "bar".to_string()],
        };
        assert_eq!(error.to_string(), "duplicated packages: [foo,foo,bar]");
    }

    #[test]
    fn test_missing_dependency_display() {
        let missing = MissingDependency {
            dependency: "fzf".to_string(),
            package: "enhancd".to_string(),
            suggestion: None,
        };
        assert_eq!(missing.to_string(), "\"fzf\": not a valid package name in depends-on of enhancd");
    }

    #[test]
    fn test_schema_error_lists_each_reason() {
        let error = AfxError::SchemaError {
            file: "main.yaml".to_string(),
            reasons: vec!["a".to_string(), "b".to_string()],
        };
        let msg = error.to_string();
        assert!(msg.contains("main.yaml"));
        assert!(msg.contains("\n  - a"));
        assert!(msg.contains("\n  - b"));
    }

    #[test]
    fn test_cycle_context_carries_missing_details() {
        let error = AfxError::CircularDependency {
            chain: "a → b → a".to_string(),
            missing: vec![MissingDependency {
                dependency: "c".to_string(),
                package: "a".to_string(),
                suggestion: None,
            }],
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));
        assert!(ctx.to_string().contains("a → b → a"));
        assert!(ctx.details.as_deref().is_some_and(|d| d.contains("\"c\"")));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_generic_error_includes_chain() {
        let error = anyhow::anyhow!("root cause").context("while loading");
        let ctx = user_friendly_error(error);
        let msg = ctx.to_string();
        assert!(msg.contains("while loading"));
        assert!(msg.contains("root cause"));
    }
}
