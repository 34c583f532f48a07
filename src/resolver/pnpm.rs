//! `pnpm list --json`: an array of projects, each with a nested
//! `dependencies` map

use super::flatten::{self, DependencyTree};
use super::DependencyRecord;
use crate::core::{VsixError, VsixResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    #[serde(default)]
    dependencies: BTreeMap<String, PnpmNode>,
}

/// `from` and `resolved` are present too but not needed
#[derive(Debug, Deserialize)]
struct PnpmNode {
    #[serde(default)]
    version: Option<String>,
    path: PathBuf,
    #[serde(default)]
    dependencies: BTreeMap<String, PnpmNode>,
}

/// Parse pnpm's listing into records.
///
/// Malformed output is a `ParseFailure`; an empty array means the project
/// has no production dependencies. With `packaged`, only the named
/// top-level dependencies and their subtrees are kept.
pub fn parse(stdout: &str, packaged: Option<&[String]>) -> VsixResult<Vec<DependencyRecord>> {
    let entries: Vec<ProjectEntry> = serde_json::from_str(stdout.trim())
        .map_err(|e| VsixError::ParseFailure(format!("pnpm list output: {}", e)))?;

    let Some(project) = entries.into_iter().next() else {
        tracing::debug!("pnpm listed no projects");
        return Ok(Vec::new());
    };

    let trees: Vec<DependencyTree> = project
        .dependencies
        .iter()
        .filter(|(name, _)| packaged.map_or(true, |names| names.contains(*name)))
        .map(|(name, node)| to_tree(name, node))
        .collect();

    Ok(flatten::flatten(&trees))
}

fn to_tree(name: &str, node: &PnpmNode) -> DependencyTree {
    DependencyTree {
        name: name.to_string(),
        version: node.version.clone(),
        path: node.path.clone(),
        children: node
            .dependencies
            .iter()
            .map(|(child_name, child)| to_tree(child_name, child))
            .collect(),
    }
}
