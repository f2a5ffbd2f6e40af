//! Glob matching for plugin sources and command links.
//!
//! Package files are located with two independent strategies whose results
//! are unioned:
//!
//! - **Shell glob** ([`PatternMatcher::shell_glob`]): classic `*`, `?` and
//!   `[...]` expansion, the way a POSIX shell would expand the pattern.
//! - **Super-glob** ([`PatternMatcher::super_glob`]): a directory walk from the
//!   pattern's literal prefix where `**` spans any number of directories,
//!   including none.
//!
//! Matches are de-duplicated in first-seen order: shell glob results first,
//! then super-glob results that were not already seen.
//!
//! # Examples
//!
//! ```rust,no_run
//! use afx::pattern::resolve_sources;
//! use std::path::Path;
//!
//! let home = Path::new("/home/me/.afx/github.com/b4b4r07/enhancd");
//! let sources = resolve_sources(home, &["init.sh".to_string(), "**/*.zsh".to_string()]);
//! for src in sources {
//!     println!("source {}", src.display());
//! }
//! ```

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::utils::join_unless_absolute;

const GLOB_META: [char; 3] = ['*', '?', '['];

fn has_glob_meta(s: &str) -> bool {
    s.contains(GLOB_META)
}

/// Options for the super-glob: `*` stays within one path component.
const SUPER_GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A glob over absolute (or cwd-relative) filesystem paths.
///
/// Each strategy compiles the pattern on its own, so a pattern one of them
/// rejects can still match through the other.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    /// Compiled super-glob, `None` when `**` is not a whole component.
    pattern: Option<Pattern>,
    shell_pattern: String,
    original_pattern: String,
}

impl PatternMatcher {
    /// Prepares both strategies for `pattern_str`.
    pub fn new(pattern_str: &str) -> Self {
        let shell_pattern = shell_pattern(pattern_str);
        let pattern = match Pattern::new(pattern_str) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                debug!("super-glob disabled for '{pattern_str}': {e}");
                None
            }
        };
        if pattern.is_none() && Pattern::new(&shell_pattern).is_err() {
            warn!("Invalid glob pattern: {pattern_str}");
        }

        Self {
            pattern,
            shell_pattern,
            original_pattern: pattern_str.to_string(),
        }
    }

    /// Expands the pattern the way a shell without `globstar` would: a `**`
    /// inside a component behaves like `*`.
    pub fn shell_glob(&self) -> Vec<PathBuf> {
        match glob::glob(&self.shell_pattern) {
            Ok(paths) => paths.filter_map(std::result::Result::ok).collect(),
            Err(e) => {
                debug!("shell glob failed for '{}': {}", self.shell_pattern, e);
                Vec::new()
            }
        }
    }

    /// Walks from the literal prefix of the pattern and keeps every path the
    /// pattern matches. `**` matches zero or more directories.
    ///
    /// Symlinks are not followed during the walk. Entries that cannot be read
    /// are skipped.
    pub fn super_glob(&self) -> Vec<PathBuf> {
        let path = Path::new(&self.original_pattern);
        if !has_glob_meta(&self.original_pattern) {
            return if path.exists() {
                vec![path.to_path_buf()]
            } else {
                Vec::new()
            };
        }
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        let base = literal_prefix(path);
        if !base.is_dir() {
            trace!("super-glob base {:?} is not a directory", base);
            return Vec::new();
        }

        let mut matches = Vec::new();
        for entry in WalkDir::new(&base)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let candidate = entry.path();
            if pattern.matches_path_with(candidate, SUPER_GLOB_OPTIONS) {
                trace!("super-glob match: {}", candidate.display());
                matches.push(candidate.to_path_buf());
            }
        }
        matches
    }

    /// Union of [`shell_glob`](Self::shell_glob) and
    /// [`super_glob`](Self::super_glob), de-duplicated in first-seen order.
    pub fn find_matches(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let matches: Vec<PathBuf> = self
            .shell_glob()
            .into_iter()
            .chain(self.super_glob())
            .filter(|p| seen.insert(p.clone()))
            .collect();
        debug!("Found {} matches for pattern '{}'", matches.len(), self.original_pattern);
        matches
    }
}

/// Rewrites every `**` that is not a whole path component to `*`.
fn shell_pattern(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|part| {
            if part == "**" {
                return part.to_string();
            }
            let mut out = String::with_capacity(part.len());
            for c in part.chars() {
                if c == '*' && out.ends_with('*') {
                    continue;
                }
                out.push(c);
            }
            out
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Longest leading run of components free of glob metacharacters.
fn literal_prefix(path: &Path) -> PathBuf {
    let mut base = PathBuf::new();
    for component in path.components() {
        if let Component::Normal(part) = component
            && has_glob_meta(&part.to_string_lossy())
        {
            break;
        }
        base.push(component);
    }
    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}

/// Expands one pattern with both strategies. An invalid pattern matches nothing.
pub fn glob(path: &Path) -> Vec<PathBuf> {
    PatternMatcher::new(&path.to_string_lossy()).find_matches()
}

/// Resolves source patterns against a package home.
///
/// Relative patterns are joined onto `home`; absolute ones are used as-is.
/// Results keep pattern order, then strategy order, with duplicates across
/// patterns removed. Paths that no longer exist are dropped.
pub fn resolve_sources(home: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for pattern in patterns {
        let full = join_unless_absolute(home, pattern);
        for path in glob(&full) {
            if !path.exists() {
                trace!("dropping vanished match {}", path.display());
                continue;
            }
            if seen.insert(path.clone()) {
                sources.push(path);
            }
        }
    }
    sources
}

/// True when every pattern has at least one match under `home`.
pub fn all_patterns_match(home: &Path, patterns: &[String]) -> bool {
    patterns.iter().all(|pattern| !glob(&join_unless_absolute(home, pattern)).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_literal_prefix() {
        assert_eq!(literal_prefix(Path::new("/a/b/*.sh")), PathBuf::from("/a/b"));
        assert_eq!(literal_prefix(Path::new("/a/**/c")), PathBuf::from("/a"));
        assert_eq!(literal_prefix(Path::new("*.sh")), PathBuf::from("."));
    }

    #[test]
    fn test_super_glob_spans_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "init.zsh");
        touch(temp.path(), "lib/deep/more.zsh");
        touch(temp.path(), "lib/other.sh");

        let matcher = PatternMatcher::new(&format!("{}/**/*.zsh", temp.path().display()));
        let matches = matcher.super_glob();
        assert_eq!(
            matches,
            vec![temp.path().join("init.zsh"), temp.path().join("lib/deep/more.zsh")]
        );
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "bin/init.sh");
        touch(temp.path(), "bin/nested/skip.sh");

        let matcher = PatternMatcher::new(&format!("{}/bin/*.sh", temp.path().display()));
        assert_eq!(matcher.find_matches(), vec![temp.path().join("bin/init.sh")]);
    }

    #[test]
    fn test_union_has_no_duplicates() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.sh");
        touch(temp.path(), "b.sh");

        let matches = glob(&temp.path().join("*.sh"));
        assert_eq!(matches, vec![temp.path().join("a.sh"), temp.path().join("b.sh")]);
    }

    #[test]
    fn test_literal_pattern() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "plugin.zsh");
        assert_eq!(glob(&temp.path().join("plugin.zsh")), vec![temp.path().join("plugin.zsh")]);
        assert!(glob(&temp.path().join("missing.zsh")).is_empty());
    }

    #[test]
    fn test_invalid_pattern_matches_nothing() {
        assert!(glob(Path::new("/tmp/[unclosed")).is_empty());
    }

    #[test]
    fn test_resolve_sources_keeps_pattern_order() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "z.sh");
        touch(temp.path(), "a.sh");

        let sources =
            resolve_sources(temp.path(), &["z.sh".to_string(), "*.sh".to_string()]);
        assert_eq!(sources, vec![temp.path().join("z.sh"), temp.path().join("a.sh")]);
    }

    #[test]
    fn test_resolve_sources_accepts_absolute_patterns() {
        let temp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        touch(other.path(), "abs.sh");

        let abs = other.path().join("abs.sh").to_string_lossy().into_owned();
        assert_eq!(resolve_sources(temp.path(), &[abs]), vec![other.path().join("abs.sh")]);
    }

    #[test]
    fn test_all_patterns_match_is_and() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "bin/init.sh");

        assert!(all_patterns_match(temp.path(), &["bin/*.sh".to_string()]));
        assert!(!all_patterns_match(
            temp.path(),
            &["bin/*.sh".to_string(), "completions/*".to_string()]
        ));
    }

    #[test]
    fn test_shell_pattern_collapses_inner_double_star() {
        assert_eq!(shell_pattern("/x/zsh/**.zsh"), "/x/zsh/*.zsh");
        assert_eq!(shell_pattern("/x/lib/foo**"), "/x/lib/foo*");
        assert_eq!(shell_pattern("/x/**/*.zsh"), "/x/**/*.zsh");
    }

    #[test]
    fn test_inner_double_star_matches_like_star() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "zsh/a.zsh");
        touch(temp.path(), "zsh/nested/b.zsh");

        let matcher = PatternMatcher::new(&format!("{}/zsh/**.zsh", temp.path().display()));
        assert!(matcher.super_glob().is_empty());
        assert_eq!(
            resolve_sources(temp.path(), &["zsh/**.zsh".to_string()]),
            vec![temp.path().join("zsh/a.zsh")]
        );
        assert!(all_patterns_match(temp.path(), &["zsh/**.zsh".to_string()]));
    }
}
