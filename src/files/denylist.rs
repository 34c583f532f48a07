//! Files and directories that never belong in a package, whatever the
//! project's own ignore files say.

use crate::core::{VsixError, VsixResult};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Directory names pruned from the walk at any depth
const DENIED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    ".vscode-test",
    ".vscode-test-web",
    ".idea",
];

/// Relative-path globs; `*` does not cross `/`
const DENIED_GLOBS: &[&str] = &[
    // package manager metadata
    "package-lock.json",
    "npm-shrinkwrap.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "npm-debug.log",
    "yarn-error.log",
    ".npmrc",
    ".yarnrc",
    ".yarnrc.yml",
    // VCS and editor metadata
    ".gitignore",
    ".gitattributes",
    ".editorconfig",
    ".github/**",
    "**/.DS_Store",
    // tooling configuration
    ".eslintrc*",
    ".prettierrc*",
    ".babelrc*",
    "tslint.yaml",
    ".travis.yml",
    "appveyor.yml",
    "*.todo",
    // repository documents
    "CONTRIBUTING.md",
    "CODE_OF_CONDUCT.md",
    "ISSUE_TEMPLATE.md",
    "PULL_REQUEST_TEMPLATE.md",
    // build artifacts
    "**/*.vsix",
    "**/*.vsixmanifest",
];

/// The built-in exclusion layer
#[derive(Debug)]
pub struct BuiltinDenylist {
    globs: GlobSet,
}

impl BuiltinDenylist {
    /// Build the denylist, additionally denying the named ignore files
    pub fn new(extra_files: &[&str]) -> VsixResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in DENIED_GLOBS.iter().chain(extra_files.iter()) {
            builder.add(compile(pattern)?);
        }
        let globs = builder
            .build()
            .map_err(|e| VsixError::InvalidPattern(e.to_string()))?;
        Ok(Self { globs })
    }

    /// Should the walk skip this directory entirely?
    pub fn excludes_dir(&self, relative_dir: &Path) -> bool {
        relative_dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| DENIED_DIRS.contains(&name))
    }

    /// Is this file denied by the built-in list?
    pub fn excludes_file(&self, relative_path: &Path) -> bool {
        let in_denied_dir = relative_path
            .parent()
            .into_iter()
            .flat_map(Path::ancestors)
            .any(|dir| self.excludes_dir(dir));

        in_denied_dir || self.globs.is_match(relative_path)
    }
}

fn compile(pattern: &str) -> VsixResult<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| VsixError::InvalidPattern(format!("{}: {}", pattern, e)))
}
