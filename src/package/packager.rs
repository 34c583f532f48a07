//! The packaging pipeline

use super::archive::{self, ArchiveEntry, WriteSummary};
use super::assets::{AssetLocator, ManifestAsset};
use super::content_types::{ContentTypes, CONTENT_TYPES_PATH};
use super::extension_kind::{self, ExtensionKind};
use super::prepublish::run_prepublish;
use super::validator::ManifestValidator;
use super::vsix_manifest::{VsixManifest, VSIX_MANIFEST_PATH};
use crate::core::VsixResult;
use crate::di::ServiceContainer;
use crate::files::{FileCollector, IgnoreRuleSet, PackageFile, ARCHIVE_ROOT};
use crate::package::Manifest;
use crate::resolver::{
    detect_package_manager, DependencyRecord, DependencyResolver, PackageManager,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Value of `--package-manager` that disables dependency bundling
pub const NO_PACKAGE_MANAGER: &str = "none";

/// Per-invocation overrides; `None` defers to the configuration
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    pub output: Option<PathBuf>,
    pub dependencies: Option<bool>,
    pub package_manager: Option<String>,
    pub packaged_dependencies: Option<Vec<String>>,
    pub readme_path: Option<String>,
    pub ignore_file: Option<String>,
    pub prepublish: Option<bool>,
}

/// Outcome of a successful `pack`
#[derive(Debug, Clone)]
pub struct PackageSummary {
    pub id: String,
    pub version: String,
    pub kinds: BTreeSet<ExtensionKind>,
    pub written: WriteSummary,
}

/// Files selected for packaging, before archive metadata is generated
struct Selection {
    files: Vec<PackageFile>,
    assets: Vec<ManifestAsset>,
}

/// Packages the extension project at `root`
pub struct Packager {
    root: PathBuf,
    container: ServiceContainer,
}

impl Packager {
    pub fn new(root: &Path, container: ServiceContainer) -> Self {
        Self {
            root: root.to_path_buf(),
            container,
        }
    }

    /// Build the vsix. Nothing is written unless every earlier stage
    /// succeeds.
    pub async fn pack(&self, options: &PackOptions) -> VsixResult<PackageSummary> {
        let manifest = Manifest::load(&self.root)?;
        ManifestValidator::validate(&manifest)?;

        if options
            .prepublish
            .unwrap_or_else(|| self.container.config.run_prepublish())
        {
            let manager = self.script_manager(options)?;
            run_prepublish(self.container.runner.as_ref(), manager, &manifest, &self.root)
                .await?;
        }

        let selection = self.select(&manifest, options).await?;
        let kinds = extension_kind::classify(&manifest)?;

        let vsix_manifest = VsixManifest::new(&manifest, &kinds, &selection.assets).render();
        let mut entries = archive::expand(selection.files)?;
        entries.insert(
            0,
            ArchiveEntry {
                path: VSIX_MANIFEST_PATH.to_string(),
                source: archive::EntrySource::Bytes(vsix_manifest.into_bytes()),
            },
        );

        let content_types = ContentTypes::new(self.container.config.content_type_fallback())
            .render(entries.iter().map(|e| e.path.as_str()))?;
        entries.insert(
            0,
            ArchiveEntry {
                path: CONTENT_TYPES_PATH.to_string(),
                source: archive::EntrySource::Bytes(content_types.into_bytes()),
            },
        );

        let output = options
            .output
            .clone()
            .unwrap_or_else(|| self.root.join(default_file_name(&manifest)));
        let written = archive::write_vsix(&entries, &output)?;

        Ok(PackageSummary {
            id: manifest.id(),
            version: manifest.version.clone(),
            kinds,
            written,
        })
    }

    /// Paths, relative to the extension root, of every file `pack` would
    /// store; sorted
    pub async fn list_files(&self, options: &PackOptions) -> VsixResult<Vec<String>> {
        let manifest = Manifest::load(&self.root)?;
        let selection = self.select(&manifest, options).await?;

        let prefix = format!("{}/", ARCHIVE_ROOT);
        let mut paths: Vec<String> = archive::expand(selection.files)?
            .into_iter()
            .map(|entry| {
                entry
                    .path
                    .strip_prefix(&prefix)
                    .map(str::to_string)
                    .unwrap_or(entry.path)
            })
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Collect files, merge dependencies and locate assets
    async fn select(&self, manifest: &Manifest, options: &PackOptions) -> VsixResult<Selection> {
        let config = &self.container.config;
        let ignore_file = options
            .ignore_file
            .as_deref()
            .unwrap_or_else(|| config.ignore_file());
        let general_ignore_file = config.general_ignore_file();

        let rules = IgnoreRuleSet::load(&self.root, general_ignore_file, ignore_file)?;
        tracing::debug!("Ignore rules read from {:?}", rules.sources());
        let dependencies = self.dependencies(manifest, options).await?;

        let collector = FileCollector::new(
            &self.root,
            &rules,
            options.readme_path.as_deref(),
            &[ignore_file, general_ignore_file],
        )?;
        let files = collector.collect(&dependencies)?;

        let located = AssetLocator::new(manifest, options.readme_path.as_deref()).locate(files)?;
        Ok(Selection {
            files: located.files,
            assets: located.assets,
        })
    }

    async fn dependencies(
        &self,
        manifest: &Manifest,
        options: &PackOptions,
    ) -> VsixResult<Vec<DependencyRecord>> {
        let enabled = options
            .dependencies
            .unwrap_or_else(|| self.container.config.bundle_dependencies());
        if !enabled {
            tracing::debug!("Dependency bundling disabled");
            return Ok(Vec::new());
        }

        let requested = options
            .package_manager
            .as_deref()
            .or_else(|| self.container.config.package_manager());
        let manager = match requested {
            Some(NO_PACKAGE_MANAGER) => {
                tracing::debug!("Package manager 'none', not bundling dependencies");
                return Ok(Vec::new());
            }
            Some(name) => name.parse::<PackageManager>()?,
            None => detect_package_manager(&self.root)?,
        };

        let resolver = DependencyResolver::new(self.container.runner.clone());
        let records = resolver
            .resolve(
                manager,
                manifest,
                &self.root,
                options.packaged_dependencies.as_deref(),
            )
            .await?;

        // Hoisted references can point at paths with nothing installed
        Ok(records
            .into_iter()
            .filter(|record| {
                let present = record.installed_path.exists();
                if !present {
                    tracing::debug!(
                        "Skipping {}: {} does not exist",
                        record.name,
                        record.installed_path.display()
                    );
                }
                present
            })
            .collect())
    }

    /// Manager used to run scripts: the requested one, else the detected
    /// one, else npm
    fn script_manager(&self, options: &PackOptions) -> VsixResult<PackageManager> {
        let requested = options
            .package_manager
            .as_deref()
            .or_else(|| self.container.config.package_manager());
        match requested {
            Some(NO_PACKAGE_MANAGER) | None => match detect_package_manager(&self.root) {
                Ok(manager) => Ok(manager),
                Err(e) => {
                    tracing::debug!("Falling back to npm for scripts: {}", e);
                    Ok(PackageManager::Npm)
                }
            },
            Some(name) => name.parse(),
        }
    }
}

/// `<name>-<version>.vsix`
pub fn default_file_name(manifest: &Manifest) -> String {
    format!("{}-{}.vsix", manifest.name, manifest.version)
}
