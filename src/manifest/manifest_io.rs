//! Reading config files from disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{Config, validation};
use crate::config::AppConfig;
use crate::core::AfxError;

/// Everything read from the config path.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Package lists of every file, concatenated in file order.
    pub config: Config,
    /// Defaults with every file's `config:` block applied.
    pub app: AppConfig,
    /// Files that were read, in order.
    pub files: Vec<PathBuf>,
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"))
}

/// Lists the YAML files at `path`.
///
/// A directory is walked recursively and its `.yaml` / `.yml` files are
/// returned sorted by path. A file path is returned as is when it has a YAML
/// extension; any other file is skipped with a warning.
///
/// # Errors
///
/// Returns [`AfxError::ConfigNotFound`] if `path` does not exist, or an I/O
/// error if the directory cannot be walked.
pub fn walk_dir(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(AfxError::ConfigNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    if path.is_file() {
        if is_yaml(path) {
            return Ok(vec![path.to_path_buf()]);
        }
        warn!("{}: not a YAML file, skipped", path.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to walk config directory {}", path.display()))?;
        if entry.file_type().is_file() && is_yaml(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Decodes and validates a single config file.
///
/// A file holding only comments or whitespace decodes to an empty
/// [`Config`].
///
/// # Errors
///
/// - [`AfxError::ConfigParseError`] if the YAML is malformed, has unknown
///   fields or repeats a key
/// - [`AfxError::SchemaError`] if required values are empty
pub fn read(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    if content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    }) {
        debug!("{}: empty config file", path.display());
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(&content).map_err(|e| AfxError::ConfigParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;

    validation::validate_schema(&config).map_err(|reasons| AfxError::SchemaError {
        file: path.display().to_string(),
        reasons,
    })?;

    Ok(config)
}

/// Reads every config file at `path` and merges them.
///
/// # Errors
///
/// Fails on the first file that cannot be read, decoded or validated; see
/// [`walk_dir`] and [`read`].
pub fn load(path: &Path) -> Result<LoadedConfig> {
    let files = walk_dir(path)?;
    if files.is_empty() {
        warn!("{}: no config files found", path.display());
    }

    let mut loaded = LoadedConfig {
        files: files.clone(),
        ..Default::default()
    };
    for file in &files {
        let config = read(file)?;
        debug!("{}: {} package(s)", file.display(), config.package_count());
        if let Some(overrides) = &config.config {
            loaded.app.merge(overrides);
        }
        loaded.config.extend(config);
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn downcast(err: &anyhow::Error) -> &AfxError {
        err.downcast_ref::<AfxError>().expect("expected AfxError")
    }

    #[test]
    fn test_walk_dir_sorted_yaml_only() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.yml", "");
        write(temp.path(), "a.yaml", "");
        write(temp.path(), "nested/c.yaml", "");
        write(temp.path(), "notes.txt", "");

        let files = walk_dir(temp.path()).unwrap();
        let names: Vec<_> =
            files.iter().map(|f| f.strip_prefix(temp.path()).unwrap().to_path_buf()).collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a.yaml"), PathBuf::from("b.yml"), PathBuf::from("nested/c.yaml")]
        );
    }

    #[test]
    fn test_walk_dir_skips_explicit_non_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "packages.toml", "");
        assert!(walk_dir(&path).unwrap().is_empty());
    }

    #[test]
    fn test_walk_dir_missing_path() {
        let temp = TempDir::new().unwrap();
        let err = walk_dir(&temp.path().join("absent")).unwrap_err();
        assert!(matches!(downcast(&err), AfxError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_read_comment_only_file() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "empty.yaml", "# nothing yet\n\n");
        assert_eq!(read(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_read_rejects_unknown_field() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "bad.yaml", "github:\n  - name: a\n    owner: o\n    repo: r\n    stars: 5\n");
        let err = read(&path).unwrap_err();
        assert!(matches!(downcast(&err), AfxError::ConfigParseError { .. }));
    }

    #[test]
    fn test_read_rejects_duplicate_key() {
        let temp = TempDir::new().unwrap();
        let path =
            write(temp.path(), "dup.yaml", "local:\n  - name: a\n    name: b\n    directory: /tmp\n");
        let err = read(&path).unwrap_err();
        assert!(matches!(downcast(&err), AfxError::ConfigParseError { .. }));
    }

    #[test]
    fn test_read_rejects_empty_sources() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "empty-sources.yaml",
            "local:\n  - name: a\n    directory: /tmp\n    plugin:\n      sources: []\n",
        );
        let err = read(&path).unwrap_err();
        match downcast(&err) {
            AfxError::SchemaError {
                reasons,
                ..
            } => assert_eq!(reasons.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_merges_in_file_order() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "10-base.yaml",
            "local:\n  - name: first\n    directory: /tmp/a\nconfig:\n  shell: zsh\n  filter:\n    command: sk\n",
        );
        write(
            temp.path(),
            "20-extra.yaml",
            "local:\n  - name: second\n    directory: /tmp/b\nconfig:\n  shell: fish\n",
        );

        let loaded = load(temp.path()).unwrap();
        let names: Vec<&str> = loaded.config.local.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(loaded.app.shell, "fish");
        assert_eq!(loaded.app.filter.command, "sk");
        assert_eq!(loaded.files.len(), 2);
    }
}
