//! The `plugin:` block: files a package contributes to shell startup.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::OrderedMap;
use crate::pattern;

/// How a package's installed files are loaded into the shell.
///
/// ```yaml
/// plugin:
///   sources:
///     - init.sh
///   env:
///     ENHANCD_FILTER: fzf
///   snippet-prepare: |
///     export ENHANCD_DISABLE_HOME=1
///   if: "[[ $SHELL == *zsh ]]"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plugin {
    /// Glob patterns, relative to the package home unless absolute.
    pub sources: Vec<String>,
    /// Exported in declaration order.
    #[serde(default)]
    pub env: OrderedMap,
    /// Shell text emitted after everything else.
    #[serde(default)]
    pub snippet: String,
    /// Shell text emitted before the `source` lines.
    #[serde(default, rename = "snippet-prepare")]
    pub snippet_prepare: String,
    /// Shell condition; the plugin loads only if it exits 0.
    #[serde(default, rename = "if")]
    pub condition: String,
}

impl Plugin {
    /// True only if every source pattern has at least one match under `home`.
    pub fn installed(&self, home: &Path) -> bool {
        pattern::all_patterns_match(home, &self.sources)
    }

    /// Existing files the source patterns resolve to, in load order.
    pub fn sources(&self, home: &Path) -> Vec<PathBuf> {
        pattern::resolve_sources(home, &self.sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn plugin(sources: &[&str]) -> Plugin {
        Plugin {
            sources: sources.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_full_block() {
        let yaml = r#"
sources: [init.sh]
env:
  FOO: bar
snippet: echo done
snippet-prepare: echo start
if: "true"
"#;
        let plugin: Plugin = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plugin.sources, vec!["init.sh".to_string()]);
        assert_eq!(plugin.env.get("FOO"), Some("bar"));
        assert_eq!(plugin.snippet, "echo done");
        assert_eq!(plugin.snippet_prepare, "echo start");
        assert_eq!(plugin.condition, "true");
    }

    #[test]
    fn test_decode_requires_sources() {
        assert!(serde_yaml::from_str::<Plugin>("snippet: x").is_err());
    }

    #[test]
    fn test_installed_requires_every_pattern() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("bin")).unwrap();
        fs::write(temp.path().join("bin/init.sh"), "").unwrap();
        fs::write(temp.path().join("lib.zsh"), "").unwrap();

        assert!(plugin(&["bin/*.sh", "*.zsh"]).installed(temp.path()));
        assert!(!plugin(&["bin/*.sh", "*.zsh", "completions/_x"]).installed(temp.path()));
    }

    #[test]
    fn test_sources_are_absolute() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("init.sh"), "").unwrap();
        assert_eq!(plugin(&["init.sh"]).sources(temp.path()), vec![temp.path().join("init.sh")]);
    }
}
