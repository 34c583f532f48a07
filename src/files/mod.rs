//! Files destined for the archive and how they are collected.

pub mod collector;
pub mod denylist;
pub mod ignore_rules;

pub use collector::FileCollector;
pub use denylist::BuiltinDenylist;
pub use ignore_rules::IgnoreRuleSet;

use std::path::{Path, PathBuf};

/// Root segment every archive path starts with
pub const ARCHIVE_ROOT: &str = "extension";

/// One file (or, for bundled dependencies, one directory) in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageFile {
    /// Refers to a file or directory on disk; bytes are read when archiving
    Local {
        archive_path: String,
        source_path: PathBuf,
    },
    /// Owns its contents directly
    InMemory {
        archive_path: String,
        contents: Vec<u8>,
    },
}

impl PackageFile {
    pub fn local(archive_path: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        PackageFile::Local {
            archive_path: archive_path.into(),
            source_path: source_path.into(),
        }
    }

    pub fn in_memory(archive_path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        PackageFile::InMemory {
            archive_path: archive_path.into(),
            contents: contents.into(),
        }
    }

    pub fn archive_path(&self) -> &str {
        match self {
            PackageFile::Local { archive_path, .. }
            | PackageFile::InMemory { archive_path, .. } => archive_path,
        }
    }

    pub fn set_archive_path(&mut self, path: String) {
        match self {
            PackageFile::Local { archive_path, .. }
            | PackageFile::InMemory { archive_path, .. } => *archive_path = path,
        }
    }

    pub fn source_path(&self) -> Option<&Path> {
        match self {
            PackageFile::Local { source_path, .. } => Some(source_path),
            PackageFile::InMemory { .. } => None,
        }
    }
}

/// `extension/<relative>` with forward slashes
pub fn archive_path_for(relative: &str) -> String {
    format!("{}/{}", ARCHIVE_ROOT, relative.trim_start_matches("./"))
}
