//! Config validation.
//!
//! Two independent checks run at different stages:
//!
//! - [`validate_schema`] runs on each decoded file and enforces field rules
//!   serde cannot express (required strings must be non-empty, a plugin
//!   needs at least one source)
//! - [`validate`] runs on the normalized package list and rejects names that
//!   are configured more than once, across all files and kinds

use std::collections::HashSet;

use super::Config;
use crate::core::AfxError;
use crate::package::{Command, Package, Plugin};

/// Collects every field-rule violation in `config`.
///
/// # Errors
///
/// Returns one message per violation, in document order.
pub fn validate_schema(config: &Config) -> Result<(), Vec<String>> {
    let mut reasons = Vec::new();

    for (i, pkg) in config.github.iter().enumerate() {
        let at = format!("github[{i}]");
        require(&mut reasons, &at, "name", &pkg.name);
        require(&mut reasons, &at, "owner", &pkg.owner);
        require(&mut reasons, &at, "repo", &pkg.repo);
        if let Some(release) = &pkg.release {
            require(&mut reasons, &at, "release.name", &release.name);
            require(&mut reasons, &at, "release.tag", &release.tag);
        }
        check_blocks(&mut reasons, &at, pkg.plugin.as_ref(), pkg.command.as_ref());
    }

    for (i, pkg) in config.gist.iter().enumerate() {
        let at = format!("gist[{i}]");
        require(&mut reasons, &at, "name", &pkg.name);
        require(&mut reasons, &at, "owner", &pkg.owner);
        require(&mut reasons, &at, "id", &pkg.id);
        check_blocks(&mut reasons, &at, pkg.plugin.as_ref(), pkg.command.as_ref());
    }

    for (i, pkg) in config.local.iter().enumerate() {
        let at = format!("local[{i}]");
        require(&mut reasons, &at, "name", &pkg.name);
        require(&mut reasons, &at, "directory", &pkg.directory);
        check_blocks(&mut reasons, &at, pkg.plugin.as_ref(), pkg.command.as_ref());
    }

    for (i, pkg) in config.http.iter().enumerate() {
        let at = format!("http[{i}]");
        require(&mut reasons, &at, "name", &pkg.name);
        require(&mut reasons, &at, "url", &pkg.url);
        check_blocks(&mut reasons, &at, pkg.plugin.as_ref(), pkg.command.as_ref());
    }

    if reasons.is_empty() { Ok(()) } else { Err(reasons) }
}

fn require(reasons: &mut Vec<String>, at: &str, field: &str, value: &str) {
    if value.trim().is_empty() {
        reasons.push(format!("{at}.{field}: must not be empty"));
    }
}

fn check_blocks(
    reasons: &mut Vec<String>,
    at: &str,
    plugin: Option<&Plugin>,
    command: Option<&Command>,
) {
    if let Some(plugin) = plugin {
        if plugin.sources.is_empty() {
            reasons.push(format!("{at}.plugin.sources: at least one source is required"));
        }
        for (i, source) in plugin.sources.iter().enumerate() {
            require(reasons, at, &format!("plugin.sources[{i}]"), source);
        }
    }
    if let Some(command) = command {
        for (i, link) in command.link.iter().enumerate() {
            require(reasons, at, &format!("command.link[{i}].from"), &link.from);
        }
    }
}

/// Rejects package names that appear more than once.
///
/// Every occurrence after the first is reported, so three packages named
/// `foo` report `foo` twice.
///
/// # Errors
///
/// Returns [`AfxError::DuplicatePackages`] listing the repeated names in
/// encounter order.
pub fn validate(packages: &[Package]) -> Result<(), AfxError> {
    let mut seen = HashSet::new();
    let names: Vec<String> = packages
        .iter()
        .filter(|pkg| !seen.insert(pkg.name()))
        .map(|pkg| pkg.name().to_string())
        .collect();

    if names.is_empty() {
        Ok(())
    } else {
        Err(AfxError::DuplicatePackages {
            names,
        })
    }
}
