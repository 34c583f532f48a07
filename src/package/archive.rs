//! Writing the zip container

use crate::core::path::to_slash;
use crate::core::{VsixError, VsixResult};
use crate::files::PackageFile;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One file as it will be stored in the zip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub source: EntrySource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// What was written
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
}

/// Turn package files into archive entries.
///
/// Package files sharing an archive path are resolved first: the later one
/// wins, keeping the position of the first. Local directories are then
/// expanded into every file beneath them, and a directory replaces whatever
/// earlier entries sat under its path, so two installs never mix.
pub fn expand(files: Vec<PackageFile>) -> VsixResult<Vec<ArchiveEntry>> {
    let mut entries = Entries::default();

    for file in latest_per_path(files) {
        match file {
            PackageFile::InMemory {
                archive_path,
                contents,
            } => entries.insert(ArchiveEntry {
                path: archive_path,
                source: EntrySource::Bytes(contents),
            }),
            PackageFile::Local {
                archive_path,
                source_path,
            } if source_path.is_dir() => {
                entries.remove_under(&archive_path);
                for entry in WalkDir::new(&source_path)
                    .follow_links(true)
                    .sort_by_file_name()
                {
                    let entry = entry?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let relative = entry
                        .path()
                        .strip_prefix(&source_path)
                        .map_err(|e| VsixError::Path(e.to_string()))?;
                    entries.insert(ArchiveEntry {
                        path: format!("{}/{}", archive_path, to_slash(relative)),
                        source: EntrySource::File(entry.path().to_path_buf()),
                    });
                }
            }
            PackageFile::Local {
                archive_path,
                source_path,
            } => entries.insert(ArchiveEntry {
                path: archive_path,
                source: EntrySource::File(source_path),
            }),
        }
    }

    Ok(entries.into_vec())
}

/// Last package file per archive path, at the position of the first
fn latest_per_path(files: Vec<PackageFile>) -> Vec<PackageFile> {
    let mut latest: Vec<PackageFile> = Vec::with_capacity(files.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for file in files {
        match positions.get(file.archive_path()) {
            Some(&position) => {
                tracing::debug!(
                    "Duplicate archive path {}, keeping the later entry",
                    file.archive_path()
                );
                latest[position] = file;
            }
            None => {
                positions.insert(file.archive_path().to_string(), latest.len());
                latest.push(file);
            }
        }
    }

    latest
}

/// Ordered entries with replace-in-place by path
#[derive(Default)]
struct Entries {
    slots: Vec<Option<ArchiveEntry>>,
    positions: HashMap<String, usize>,
}

impl Entries {
    fn insert(&mut self, entry: ArchiveEntry) {
        match self.positions.get(&entry.path) {
            Some(&position) => self.slots[position] = Some(entry),
            None => {
                self.positions.insert(entry.path.clone(), self.slots.len());
                self.slots.push(Some(entry));
            }
        }
    }

    fn remove_under(&mut self, directory: &str) {
        let prefix = format!("{}/", directory);
        let slots = &mut self.slots;
        self.positions.retain(|path, position| {
            if !path.starts_with(&prefix) {
                return true;
            }
            tracing::debug!("Dropping {}, replaced by directory {}", path, directory);
            slots[*position] = None;
            false
        });
    }

    fn into_vec(self) -> Vec<ArchiveEntry> {
        self.slots.into_iter().flatten().collect()
    }
}

/// Write `entries` to `output`.
///
/// An existing file at `output` is replaced. If writing fails the partial
/// file is removed.
pub fn write_vsix(entries: &[ArchiveEntry], output: &Path) -> VsixResult<WriteSummary> {
    if entries.is_empty() {
        return Err(VsixError::Archive("Nothing to package".to_string()));
    }

    if output.exists() {
        fs::remove_file(output)?;
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match write_entries(entries, output) {
        Ok(()) => {
            let bytes = fs::metadata(output)?.len();
            tracing::info!(
                "Wrote {} entries ({} bytes) to {}",
                entries.len(),
                bytes,
                output.display()
            );
            Ok(WriteSummary {
                path: output.to_path_buf(),
                entries: entries.len(),
                bytes,
            })
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(output) {
                tracing::warn!("Failed to remove partial {}: {}", output.display(), cleanup);
            }
            Err(e)
        }
    }
}

fn write_entries(entries: &[ArchiveEntry], output: &Path) -> VsixResult<()> {
    let file = File::create(output)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for entry in entries {
        zip.start_file(entry.path.as_str(), options)?;
        match &entry.source {
            EntrySource::Bytes(bytes) => zip.write_all(bytes)?,
            EntrySource::File(path) => {
                let mut source = File::open(path).map_err(|e| {
                    VsixError::Archive(format!("Failed to read {}: {}", path.display(), e))
                })?;
                io::copy(&mut source, &mut zip)?;
            }
        }
    }

    zip.finish()?;
    Ok(())
}
