//! Shared flattening of tree-shaped dependency listings

use super::DependencyRecord;
use crate::core::{VsixError, VsixResult};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Transient node built while parsing a tree-shaped listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    pub name: String,
    pub version: Option<String>,
    pub path: PathBuf,
    pub children: Vec<DependencyTree>,
}

/// Depth-first flatten, first visit order, one record per installed path.
///
/// A subtree whose path has already been visited is skipped entirely, so
/// shared sub-dependencies are emitted once.
pub fn flatten(roots: &[DependencyTree]) -> Vec<DependencyRecord> {
    let mut visited = HashSet::new();
    let mut records = Vec::new();
    for root in roots {
        visit(root, &mut visited, &mut records);
    }
    records
}

fn visit(
    node: &DependencyTree,
    visited: &mut HashSet<PathBuf>,
    records: &mut Vec<DependencyRecord>,
) {
    if !visited.insert(node.path.clone()) {
        return;
    }
    records.push(DependencyRecord {
        name: node.name.clone(),
        version: node.version.clone(),
        installed_path: node.path.clone(),
    });
    for child in &node.children {
        visit(child, visited, records);
    }
}

/// Narrow top-level trees to the named dependencies plus everything they
/// reach.
///
/// Children are matched by name against the top-level trees, which is how
/// hoisted packages are referenced; a child that is not hoisted is carried
/// along inside its parent. Reference cycles terminate because each
/// top-level tree is reached at most once.
///
/// A top-level name listed twice comes from the tool output and is a
/// `ParseFailure`. A requested name that is not listed comes from the user
/// and is a `Validation` error.
pub fn select(roots: Vec<DependencyTree>, names: &[String]) -> VsixResult<Vec<DependencyTree>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    for (position, root) in roots.iter().enumerate() {
        if index.insert(root.name.clone(), position).is_some() {
            return Err(VsixError::ParseFailure(format!(
                "Dependency listed more than once: {}",
                root.name
            )));
        }
    }

    if let Some(name) = names.iter().find(|name| !index.contains_key(name.as_str())) {
        return Err(VsixError::Validation(format!(
            "Could not find dependency: {}",
            name
        )));
    }

    let mut reached = Vec::new();
    let mut seen = HashSet::new();
    let mut pending: Vec<&str> = names.iter().rev().map(String::as_str).collect();

    while let Some(name) = pending.pop() {
        let Some(&position) = index.get(name) else {
            continue;
        };
        if !seen.insert(position) {
            continue;
        }
        reached.push(position);
        for child in roots[position].children.iter().rev() {
            pending.push(child.name.as_str());
        }
    }

    let mut slots: Vec<Option<DependencyTree>> = roots.into_iter().map(Some).collect();
    Ok(reached
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect())
}
