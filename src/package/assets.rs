//! Well-known files the marketplace displays: icon, license, details
//! (README), changelog and translations.

use crate::core::{VsixError, VsixResult};
use crate::files::{archive_path_for, PackageFile, ARCHIVE_ROOT};
use crate::package::Manifest;
use std::fmt;
use std::path::Path;

/// Candidate names, matched case-insensitively at the project root, in
/// priority order
const LICENSE_NAMES: &[&str] = &[
    "LICENSE.md",
    "LICENSE.txt",
    "LICENSE",
    "LICENCE.md",
    "LICENCE.txt",
    "LICENCE",
];
const README_NAMES: &[&str] = &["README.md", "README.markdown", "README"];
const CHANGELOG_NAMES: &[&str] = &["CHANGELOG.md", "CHANGELOG.markdown", "CHANGELOG"];

const SEE_LICENSE_IN: &str = "SEE LICENSE IN ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRole {
    /// package.json itself
    Manifest,
    Icon,
    License,
    Details,
    Changelog,
    /// Upper-cased language id
    Translation(String),
}

impl AssetRole {
    /// Asset type in the vsix manifest
    pub fn asset_type(&self) -> String {
        match self {
            AssetRole::Manifest => "Microsoft.VisualStudio.Code.Manifest".to_string(),
            AssetRole::Icon => "Microsoft.VisualStudio.Services.Icons.Default".to_string(),
            AssetRole::License => "Microsoft.VisualStudio.Services.Content.License".to_string(),
            AssetRole::Details => "Microsoft.VisualStudio.Services.Content.Details".to_string(),
            AssetRole::Changelog => {
                "Microsoft.VisualStudio.Services.Content.Changelog".to_string()
            }
            AssetRole::Translation(language) => {
                format!("Microsoft.VisualStudio.Code.Translation.{}", language)
            }
        }
    }
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetRole::Manifest => f.write_str("manifest"),
            AssetRole::Icon => f.write_str("icon"),
            AssetRole::License => f.write_str("license"),
            AssetRole::Details => f.write_str("details"),
            AssetRole::Changelog => f.write_str("changelog"),
            AssetRole::Translation(language) => write!(f, "translation ({})", language),
        }
    }
}

/// An asset and the archive path it lives at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestAsset {
    pub role: AssetRole,
    pub path: String,
}

/// Result of asset location. `files` replaces the list handed in; it may
/// carry renamed entries.
#[derive(Debug)]
pub struct LocatedAssets {
    pub files: Vec<PackageFile>,
    pub assets: Vec<ManifestAsset>,
}

impl LocatedAssets {
    pub fn find(&self, role: &AssetRole) -> Option<&ManifestAsset> {
        self.assets.iter().find(|asset| &asset.role == role)
    }
}

/// Finds assets among the collected files
pub struct AssetLocator<'a> {
    manifest: &'a Manifest,
    readme_path: Option<&'a str>,
}

impl<'a> AssetLocator<'a> {
    pub fn new(manifest: &'a Manifest, readme_path: Option<&'a str>) -> Self {
        Self {
            manifest,
            readme_path,
        }
    }

    /// Locate every asset role, taking ownership of the file list.
    ///
    /// A license without an extension gets `.md` appended; the returned
    /// list carries the renamed entry.
    pub fn locate(&self, mut files: Vec<PackageFile>) -> VsixResult<LocatedAssets> {
        let mut assets = Vec::new();

        let manifest_path = archive_path_for(crate::core::path::MANIFEST_FILE);
        if files.iter().any(|f| f.archive_path() == manifest_path) {
            assets.push(ManifestAsset {
                role: AssetRole::Manifest,
                path: manifest_path,
            });
        }

        if let Some(asset) = self.locate_license(&mut files) {
            assets.push(asset);
        }

        if let Some(icon) = &self.manifest.icon {
            let path = archive_path_for(icon);
            if !files.iter().any(|f| f.archive_path() == path) {
                return Err(VsixError::MissingAsset(format!(
                    "The specified icon '{}' wasn't found in the extension",
                    path
                )));
            }
            assets.push(ManifestAsset {
                role: AssetRole::Icon,
                path,
            });
        }

        let readme = match self.readme_path {
            Some(readme) => {
                let path = archive_path_for(readme);
                files
                    .iter()
                    .any(|f| f.archive_path() == path)
                    .then_some(path)
            }
            None => first_match(&files, README_NAMES),
        };
        if let Some(path) = readme {
            assets.push(ManifestAsset {
                role: AssetRole::Details,
                path,
            });
        }

        if let Some(path) = first_match(&files, CHANGELOG_NAMES) {
            assets.push(ManifestAsset {
                role: AssetRole::Changelog,
                path,
            });
        }

        assets.extend(self.locate_translations(&files));

        tracing::debug!(
            "Located assets: {}",
            assets
                .iter()
                .map(|a| a.role.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(LocatedAssets { files, assets })
    }

    fn locate_license(&self, files: &mut [PackageFile]) -> Option<ManifestAsset> {
        let position = match self
            .manifest
            .license
            .as_deref()
            .and_then(|l| l.strip_prefix(SEE_LICENSE_IN))
        {
            Some(named) => {
                let path = archive_path_for(named.trim());
                files.iter().position(|f| f.archive_path() == path)
            }
            None => LICENSE_NAMES.iter().find_map(|name| {
                files
                    .iter()
                    .position(|f| root_file_named(f.archive_path(), name))
            }),
        }?;

        let file = &mut files[position];
        if Path::new(file.archive_path()).extension().is_none() {
            let renamed = format!("{}.md", file.archive_path());
            tracing::debug!("Renaming {} to {}", file.archive_path(), renamed);
            file.set_archive_path(renamed);
        }

        Some(ManifestAsset {
            role: AssetRole::License,
            path: file.archive_path().to_string(),
        })
    }

    /// First translation per language whose file was collected
    fn locate_translations(&self, files: &[PackageFile]) -> Vec<ManifestAsset> {
        let mut assets: Vec<ManifestAsset> = Vec::new();

        for localization in self.manifest.localizations() {
            let role = AssetRole::Translation(localization.language_id.to_ascii_uppercase());
            if assets.iter().any(|a| a.role == role) {
                continue;
            }

            let found = localization.translations.iter().find_map(|translation| {
                let path = archive_path_for(&translation.path);
                files
                    .iter()
                    .any(|f| f.archive_path() == path)
                    .then_some(path)
            });

            match found {
                Some(path) => assets.push(ManifestAsset { role, path }),
                None => tracing::warn!(
                    "No translation file collected for language '{}'",
                    localization.language_id
                ),
            }
        }

        assets
    }
}

fn root_file_named(archive_path: &str, name: &str) -> bool {
    archive_path
        .strip_prefix(ARCHIVE_ROOT)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| rest.eq_ignore_ascii_case(name))
}

fn first_match(files: &[PackageFile], names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        files
            .iter()
            .find(|f| root_file_named(f.archive_path(), name))
            .map(|f| f.archive_path().to_string())
    })
}
