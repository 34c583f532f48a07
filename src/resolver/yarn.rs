//! `yarn list --json` (yarn classic)
//!
//! Yarn prints one JSON object per line; only the `"type":"tree"` line is
//! parsed, the rest is progress and diagnostics.

use super::flatten::{self, DependencyTree};
use super::DependencyRecord;
use crate::core::{VsixError, VsixResult};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TreeLine {
    data: TreeData,
}

#[derive(Debug, Deserialize)]
struct TreeData {
    #[serde(default)]
    trees: Vec<YarnNode>,
}

#[derive(Debug, Deserialize)]
struct YarnNode {
    name: String,
    #[serde(default)]
    children: Vec<YarnNode>,
}

/// Parse yarn's listing into records.
///
/// Without `packaged` the listing is pruned of nodes carrying a `^`/`~`
/// range, which yarn reports for hoisted references rather than installed
/// copies. With `packaged`, only those dependencies and what they reach are
/// kept, and nothing is pruned.
pub fn parse(
    stdout: &str,
    cwd: &Path,
    packaged: Option<&[String]>,
) -> VsixResult<Vec<DependencyRecord>> {
    let trees = parse_trees(stdout, cwd, packaged.is_none())?;
    let trees = match packaged {
        Some(names) => flatten::select(trees, names)?,
        None => trees,
    };
    Ok(flatten::flatten(&trees))
}

/// Locate the tree line and build the transient trees under
/// `<cwd>/node_modules`
pub fn parse_trees(stdout: &str, cwd: &Path, prune: bool) -> VsixResult<Vec<DependencyTree>> {
    let pattern = Regex::new(r#"(?m)^\{"type":"tree".*$"#)
        .map_err(|e| VsixError::ParseFailure(e.to_string()))?;

    let mut matches = pattern.find_iter(stdout);
    let line = match (matches.next(), matches.next()) {
        (Some(line), None) => line.as_str(),
        (None, _) => {
            return Err(VsixError::ParseFailure(
                "Could not parse result of `yarn list --json`: no tree found".to_string(),
            ))
        }
        (Some(_), Some(_)) => {
            return Err(VsixError::ParseFailure(
                "Could not parse result of `yarn list --json`: more than one tree".to_string(),
            ))
        }
    };

    let parsed: TreeLine = serde_json::from_str(line.trim_end())
        .map_err(|e| VsixError::ParseFailure(format!("yarn tree: {}", e)))?;

    let prefix = cwd.join("node_modules");
    Ok(parsed
        .data
        .trees
        .iter()
        .filter_map(|node| to_tree(&prefix, node, prune))
        .collect())
}

fn to_tree(prefix: &Path, node: &YarnNode, prune: bool) -> Option<DependencyTree> {
    let (name, version) = split_name(&node.name);
    if prune && version.is_some_and(|v| v.starts_with('^') || v.starts_with('~')) {
        return None;
    }

    let path = prefix.join(name);
    let child_prefix = path.join("node_modules");
    let children = node
        .children
        .iter()
        .filter_map(|child| to_tree(&child_prefix, child, prune))
        .collect();

    Some(DependencyTree {
        name: name.to_string(),
        version: version.map(str::to_string),
        path,
        children,
    })
}

/// Split `name@range` on the last `@`, keeping a scope's leading `@`
pub fn split_name(spec: &str) -> (&str, Option<&str>) {
    match spec.rfind('@') {
        Some(at) if at > 0 => (&spec[..at], Some(&spec[at + 1..])),
        _ => (spec, None),
    }
}
