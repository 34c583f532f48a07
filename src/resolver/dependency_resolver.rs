//! Runs the package manager's list command and parses its output

use super::detector::PackageManager;
use super::{npm, pnpm, yarn, DependencyRecord};
use crate::core::{VsixError, VsixResult};
use crate::di::traits::CommandRunner;
use crate::package::Manifest;
use std::path::Path;
use std::sync::Arc;

/// Resolves the production dependencies to bundle
pub struct DependencyResolver {
    runner: Arc<dyn CommandRunner>,
}

impl DependencyResolver {
    /// Create a new resolver
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Resolve using a package manager given by name.
    ///
    /// An unknown name fails before anything is run.
    pub async fn resolve_named(
        &self,
        manager: &str,
        manifest: &Manifest,
        cwd: &Path,
        packaged: Option<&[String]>,
    ) -> VsixResult<Vec<DependencyRecord>> {
        let manager: PackageManager = manager.parse()?;
        self.resolve(manager, manifest, cwd, packaged).await
    }

    /// Resolve production dependencies of the project at `cwd`.
    ///
    /// `packaged` narrows the result to the named dependencies and what they
    /// pull in. Any failure of the external command or of strict parsing
    /// fails the whole call; no partial list is returned.
    pub async fn resolve(
        &self,
        manager: PackageManager,
        manifest: &Manifest,
        cwd: &Path,
        packaged: Option<&[String]>,
    ) -> VsixResult<Vec<DependencyRecord>> {
        let program = manager.program();
        let args = manager.list_args();

        tracing::debug!("Running `{} {}` in {}", program, args.join(" "), cwd.display());
        let output = self.runner.run(program, args, cwd).await?;

        if !output.success() {
            return Err(VsixError::CommandFailed {
                command: format!("{} {}", program, args.join(" ")),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        let records = match manager {
            PackageManager::Npm => {
                let records = npm::parse(&output.stdout, cwd, manifest);
                match packaged {
                    Some(names) => npm::select(records, names, cwd)?,
                    None => records,
                }
            }
            PackageManager::Yarn => yarn::parse(&output.stdout, cwd, packaged)?,
            PackageManager::Pnpm => pnpm::parse(&output.stdout, packaged)?,
        };

        tracing::info!(
            "Resolved {} production dependenc{} with {}",
            records.len(),
            if records.len() == 1 { "y" } else { "ies" },
            manager
        );

        Ok(records)
    }
}
