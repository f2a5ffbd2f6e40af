//! Platform helpers: home directory, tilde expansion and executable lookup.
//!
//! # Examples
//!
//! ```rust,no_run
//! use afx::utils::platform::{expand_tilde, get_home_dir};
//!
//! # fn example() -> anyhow::Result<()> {
//! let home = get_home_dir()?;
//! assert_eq!(expand_tilde("~/bin"), format!("{}/bin", home.display()));
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Gets the home directory path for the current user.
///
/// # Error Cases
///
/// - `$HOME` (or `%USERPROFILE%` on Windows) is not set
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if cfg!(windows) {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Expands a leading `~` to the home directory.
///
/// Only the tilde is expanded; `$VARS` are left for the shell that sources
/// the generated script. Strings without a leading tilde are returned as-is.
#[must_use]
pub fn expand_tilde(value: &str) -> String {
    shellexpand::tilde(value).into_owned()
}

/// Tilde-expands a path-like config value.
#[must_use]
pub fn expand_path(value: &str) -> PathBuf {
    PathBuf::from(expand_tilde(value))
}

/// Joins `path` onto `base` unless it is already absolute.
#[must_use]
pub fn join_unless_absolute(base: &Path, path: &str) -> PathBuf {
    let candidate = expand_path(path);
    if candidate.is_absolute() {
        candidate
    } else {
        base.join(candidate)
    }
}

/// Checks whether an executable is available on `PATH`.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_only_touches_leading_tilde() {
        let home = get_home_dir().unwrap();
        assert_eq!(expand_tilde("~/.zsh"), format!("{}/.zsh", home.display()));
        assert_eq!(expand_tilde("/opt/x/bin"), "/opt/x/bin");
        assert_eq!(expand_tilde("$HOME/bin"), "$HOME/bin");
        assert_eq!(expand_tilde("a~b"), "a~b");
    }

    #[test]
    fn test_join_unless_absolute() {
        let base = Path::new("/srv/pkg");
        assert_eq!(join_unless_absolute(base, "bin/*.sh"), PathBuf::from("/srv/pkg/bin/*.sh"));
        assert_eq!(join_unless_absolute(base, "/etc/profile"), PathBuf::from("/etc/profile"));
    }

    #[test]
    fn test_join_expands_tilde_first() {
        let home = get_home_dir().unwrap();
        assert_eq!(join_unless_absolute(Path::new("/srv"), "~/x"), home.join("x"));
    }

    #[test]
    fn test_command_exists() {
        assert!(!command_exists("afx-definitely-not-a-real-binary"));
    }
}
