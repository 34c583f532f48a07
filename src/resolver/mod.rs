//! Production dependency resolution
//!
//! Detects the package manager governing a project, runs its list command
//! and turns the output into a flat, de-duplicated list of dependencies to
//! bundle. Each manager's output has its own parser; the tree-shaped ones
//! share [`flatten::flatten`].

pub mod dependency_resolver;
pub mod detector;
pub mod flatten;
pub mod npm;
pub mod pnpm;
pub mod yarn;

pub use dependency_resolver::DependencyResolver;
pub use detector::{detect_package_manager, detect_package_manager_within, PackageManager};

use std::path::PathBuf;

/// One installed production dependency
///
/// `installed_path` identifies the record: a package hoisted once and
/// required by many parents appears a single time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    pub name: String,
    /// Unknown when the manager's output does not carry it
    pub version: Option<String>,
    pub installed_path: PathBuf,
}

impl DependencyRecord {
    pub fn new(
        name: impl Into<String>,
        version: Option<&str>,
        installed_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.map(str::to_string),
            installed_path: installed_path.into(),
        }
    }
}
