//! `npm list --parseable`: one absolute install path per line

use super::DependencyRecord;
use crate::core::path::MANIFEST_FILE;
use crate::core::{VsixError, VsixResult};
use crate::package::Manifest;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

const NODE_MODULES: &str = "node_modules";

/// Parse npm's parseable listing.
///
/// The line naming `cwd` itself is the project, not a dependency. Versions
/// come from the manifest's direct `dependencies`, so transitive packages
/// carry none.
pub fn parse(stdout: &str, cwd: &Path, manifest: &Manifest) -> Vec<DependencyRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for line in stdout.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        let path = PathBuf::from(line);
        if !path.is_absolute() {
            tracing::debug!("Skipping non-path npm output: {}", line);
            continue;
        }
        if path == cwd {
            continue;
        }
        let Some(name) = package_name(&path) else {
            tracing::debug!("No node_modules segment in {}", line);
            continue;
        };
        if !seen.insert(path.clone()) {
            continue;
        }

        let version = manifest.dependencies.get(&name).map(String::as_str);
        records.push(DependencyRecord::new(name, version, path));
    }

    records
}

/// Package name from the segments after the last `node_modules`; scoped
/// names span two segments.
pub fn package_name(path: &Path) -> Option<String> {
    let segments: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    let last = segments.iter().rposition(|s| *s == NODE_MODULES)?;
    let first = segments.get(last + 1)?;

    if first.starts_with('@') {
        let second = segments.get(last + 2)?;
        Some(format!("{}/{}", first, second))
    } else {
        Some(first.to_string())
    }
}

/// `dependencies` of an installed package's own package.json
#[derive(Debug, Default, Deserialize)]
struct InstalledManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
}

fn installed_dependencies(package_dir: &Path) -> Vec<String> {
    let path = package_dir.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("No readable {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    match serde_json::from_str::<InstalledManifest>(&content) {
        Ok(manifest) => manifest.dependencies.into_keys().collect(),
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Where Node would load `name` from when required inside `from`: the
/// nearest `node_modules/<name>` among `from` and its ancestors that npm
/// listed
fn resolve_from(from: &Path, name: &str, listed: &HashMap<&Path, usize>) -> Option<usize> {
    from.ancestors()
        .filter(|dir| !dir.ends_with(NODE_MODULES))
        .find_map(|dir| listed.get(dir.join(NODE_MODULES).join(name).as_path()).copied())
}

/// Narrow npm records to the `names` installed for the project at `cwd`
/// and everything they require, following each package's own
/// `dependencies` the way Node resolves them. Listing order is kept.
///
/// A requested name npm did not list is a `Validation` error.
pub fn select(
    records: Vec<DependencyRecord>,
    names: &[String],
    cwd: &Path,
) -> VsixResult<Vec<DependencyRecord>> {
    let listed: HashMap<&Path, usize> = records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.installed_path.as_path(), position))
        .collect();

    let mut pending = Vec::with_capacity(names.len());
    for name in names {
        let position = resolve_from(cwd, name, &listed).ok_or_else(|| {
            VsixError::Validation(format!("Could not find dependency: {}", name))
        })?;
        pending.push(position);
    }

    let mut reached = HashSet::new();
    while let Some(position) = pending.pop() {
        if !reached.insert(position) {
            continue;
        }
        let package_dir = &records[position].installed_path;
        for dependency in installed_dependencies(package_dir) {
            match resolve_from(package_dir, &dependency, &listed) {
                Some(found) => pending.push(found),
                None => tracing::debug!(
                    "{} requires {}, which npm did not list",
                    records[position].name,
                    dependency
                ),
            }
        }
    }

    Ok(records
        .into_iter()
        .enumerate()
        .filter(|(position, _)| reached.contains(position))
        .map(|(_, record)| record)
        .collect())
}
