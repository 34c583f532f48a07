//! Layered user ignore rules.
//!
//! The general ignore file is read first and the tool-specific one second,
//! so a `!pattern` in the latter can reinstate what the former excluded.

use crate::core::{VsixError, VsixResult};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Compiled ignore patterns for one collection run
#[derive(Debug)]
pub struct IgnoreRuleSet {
    matcher: Gitignore,
    sources: Vec<PathBuf>,
}

impl IgnoreRuleSet {
    /// Read `general_file` and `override_file` (both relative to `root`, or
    /// absolute) and compile them into one matcher. Missing files add no rules.
    pub fn load(root: &Path, general_file: &str, override_file: &str) -> VsixResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut sources = Vec::new();

        for name in [general_file, override_file] {
            let path = root.join(name);
            if !path.is_file() {
                tracing::debug!("Ignore file {} not present", path.display());
                continue;
            }

            let content = fs::read_to_string(&path)?;
            for line in content.lines() {
                builder
                    .add_line(Some(path.clone()), line)
                    .map_err(|e| {
                        VsixError::InvalidPattern(format!(
                            "{} in {}: {}",
                            line.trim(),
                            path.display(),
                            e
                        ))
                    })?;
            }
            sources.push(path);
        }

        let matcher = builder
            .build()
            .map_err(|e| VsixError::InvalidPattern(e.to_string()))?;

        tracing::debug!(
            "Compiled {} ignore pattern(s) from {} file(s)",
            matcher.num_ignores() + matcher.num_whitelists(),
            sources.len()
        );

        Ok(Self { matcher, sources })
    }

    /// Compile patterns given inline, one per line
    pub fn from_patterns(root: &Path, patterns: &[&str]) -> VsixResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|e| VsixError::InvalidPattern(format!("{}: {}", pattern, e)))?;
        }
        let matcher = builder
            .build()
            .map_err(|e| VsixError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            matcher,
            sources: Vec::new(),
        })
    }

    /// A rule set that excludes nothing
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            sources: Vec::new(),
        }
    }

    /// Is the file at `relative_path` (relative to the project root) excluded?
    ///
    /// A later negation for the path itself wins over an earlier exclusion of
    /// the path or one of its parent directories.
    pub fn is_ignored(&self, relative_path: &Path) -> bool {
        self.matcher
            .matched_path_or_any_parents(relative_path, false)
            .is_ignore()
    }

    /// Can a walk skip the directory at `relative_dir` without reading it?
    ///
    /// Only when the directory is excluded and the rules hold no negation
    /// that could reinstate something beneath it.
    pub fn prunes_dir(&self, relative_dir: &Path) -> bool {
        self.matcher.num_whitelists() == 0
            && self
                .matcher
                .matched_path_or_any_parents(relative_dir, true)
                .is_ignore()
    }

    /// Ignore files that contributed rules
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}
