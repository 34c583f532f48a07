//! Reading an existing vsix back

use crate::core::{VsixError, VsixResult};
use crate::files::archive_path_for;
use crate::package::Manifest;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// One stored file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub path: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// Contents of a vsix
#[derive(Debug, Clone)]
pub struct VsixContents {
    pub entries: Vec<EntryInfo>,
    pub manifest: Manifest,
}

/// List the entries of the vsix at `path` and parse its package.json
pub fn read_vsix(path: &Path) -> VsixResult<VsixContents> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| VsixError::Archive(format!("{} is not a valid vsix: {}", path.display(), e)))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        entries.push(EntryInfo {
            path: entry.name().to_string(),
            size: entry.size(),
        });
    }

    let manifest_path = archive_path_for(crate::core::path::MANIFEST_FILE);
    let mut content = String::new();
    match archive.by_name(&manifest_path) {
        Ok(mut manifest_file) => {
            manifest_file.read_to_string(&mut content)?;
        }
        Err(ZipError::FileNotFound) => {
            return Err(VsixError::Archive(format!(
                "{} has no {}",
                path.display(),
                manifest_path
            )))
        }
        Err(e) => return Err(e.into()),
    }

    let manifest = Manifest::parse(&content)?;
    tracing::debug!("Read {} entries from {}", entries.len(), path.display());

    Ok(VsixContents { entries, manifest })
}
