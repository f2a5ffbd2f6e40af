//! Dependency resolution for configured packages.
//!
//! [`sort`] turns the package list into load order: every package appears
//! after all the packages its `depends-on` names. Resolution happens in
//! three steps:
//!
//! 1. **Name table**: packages are indexed by name in config order. A name
//!    configured twice keeps its first position and its last definition.
//! 2. **Missing dependencies**: every `depends-on` entry that names no
//!    package is collected, with a "did you mean" suggestion when a
//!    configured name is close enough.
//! 3. **Ordering**: a [`DependencyGraph`] over the table yields a
//!    topological order. Packages that do not depend on each other keep
//!    their config order.
//!
//! Missing dependencies alone do not stop ordering; they are returned in
//! [`Resolution::missing`] so the caller decides whether they are fatal. A
//! cycle is always fatal and is reported together with any missing
//! dependencies found in the same pass.
//!
//! ```rust
//! use afx::config::Layout;
//! use afx::package::{Local, Package};
//! use afx::resolver::sort;
//!
//! let layout = Layout::new("/r", "/b");
//! let a = Local {
//!     name: "a".to_string(),
//!     directory: "/tmp/a".to_string(),
//!     depends_on: vec!["b".to_string()],
//!     ..Default::default()
//! };
//! let b = Local {
//!     name: "b".to_string(),
//!     directory: "/tmp/b".to_string(),
//!     ..Default::default()
//! };
//! let packages = vec![Package::new(a, &layout), Package::new(b, &layout)];
//!
//! let resolution = sort(&packages).unwrap();
//! let names: Vec<&str> = resolution.packages.iter().map(|p| p.name()).collect();
//! assert_eq!(names, ["b", "a"]);
//! ```

pub mod dependency_graph;

pub use dependency_graph::DependencyGraph;

use std::collections::HashMap;
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::core::{AfxError, MissingDependency};
use crate::package::Package;

/// Maximum Levenshtein distance, as a percentage of the missing name's
/// length, for a configured name to be offered as a suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Outcome of a successful [`sort`].
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Packages in load order.
    pub packages: Vec<Package>,
    /// Dependencies that name no configured package.
    pub missing: Vec<MissingDependency>,
}

impl Resolution {
    /// Treats missing dependencies as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AfxError::MissingDependencies`] if any were found.
    pub fn into_result(self) -> Result<Vec<Package>, AfxError> {
        if self.missing.is_empty() {
            Ok(self.packages)
        } else {
            Err(AfxError::MissingDependencies {
                missing: self.missing,
            })
        }
    }
}

/// Packages indexed by name, iterating in first-insertion order.
struct NameTable<'a> {
    order: Vec<&'a Package>,
    index: HashMap<&'a str, usize>,
}

impl<'a> NameTable<'a> {
    fn new(packages: &'a [Package]) -> Self {
        let mut table = Self {
            order: Vec::with_capacity(packages.len()),
            index: HashMap::with_capacity(packages.len()),
        };
        for pkg in packages {
            match table.index.get(pkg.name()) {
                Some(&position) => table.order[position] = pkg,
                None => {
                    table.index.insert(pkg.name(), table.order.len());
                    table.order.push(pkg);
                }
            }
        }
        table
    }

    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&'a Package> {
        self.index.get(name).map(|&position| self.order[position])
    }

    fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.order.iter().copied().map(Package::name)
    }
}

/// Orders packages so that dependencies load before their dependents.
///
/// # Errors
///
/// Returns [`AfxError::CircularDependency`] if the `depends-on` relation has
/// a cycle. Any missing dependencies found alongside the cycle are carried
/// in the error.
pub fn sort(packages: &[Package]) -> Result<Resolution, AfxError> {
    let table = NameTable::new(packages);
    let missing = find_missing(&table);

    let mut graph = DependencyGraph::new();
    for name in table.names() {
        graph.ensure_node(name);
    }
    for pkg in &table.order {
        for dep in pkg.depends_on() {
            if dep == pkg.name() {
                warn!("{}: ignoring dependency on itself", pkg.name());
                continue;
            }
            // missing names were collected above; they get no edge
            graph.add_dependency(pkg.name(), dep);
        }
    }

    let order = graph.topological_order().map_err(|cycle| AfxError::CircularDependency {
        chain: cycle.join(" → "),
        missing: missing.clone(),
    })?;

    let packages: Vec<Package> =
        order.iter().filter_map(|name| table.get(name)).cloned().collect();
    debug!(
        "Resolved load order: {}",
        packages.iter().map(Package::name).collect::<Vec<_>>().join(", ")
    );

    Ok(Resolution {
        packages,
        missing,
    })
}

fn find_missing(table: &NameTable<'_>) -> Vec<MissingDependency> {
    let mut missing = Vec::new();
    for pkg in &table.order {
        for dep in pkg.depends_on() {
            if table.contains(dep) {
                continue;
            }
            missing.push(MissingDependency {
                dependency: dep.clone(),
                package: pkg.name().to_string(),
                suggestion: closest_name(dep, table.names()),
            });
        }
    }
    missing
}

fn closest_name<'a>(target: &str, names: impl Iterator<Item = &'a str>) -> Option<String> {
    let limit = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    names
        .map(|name| (levenshtein(target, name), name))
        .filter(|(distance, _)| *distance <= limit)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name.to_string())
}
