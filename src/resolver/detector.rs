//! Package manager detection
//!
//! Finds the nearest directory (the start directory or one of its
//! ancestors) carrying a lock file or a `packageManager` hint and reports
//! which manager governs it.

use crate::core::path::MANIFEST_FILE;
use crate::core::{VsixError, VsixResult};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Package managers whose dependency listings can be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    /// Yarn 1.x ("classic")
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Arguments listing production dependencies in the format the
    /// matching parser expects
    pub fn list_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm => &[
                "list",
                "--production",
                "--parseable",
                "--depth=99999",
                "--loglevel=error",
            ],
            PackageManager::Yarn => &["list", "--prod", "--json"],
            PackageManager::Pnpm => &[
                "list",
                "--production",
                "--json",
                "--depth=99999",
                "--loglevel=error",
            ],
        }
    }

    /// Lock files identifying this manager
    pub fn lockfiles(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm => &["package-lock.json", "npm-shrinkwrap.json"],
            PackageManager::Yarn => &["yarn.lock"],
            PackageManager::Pnpm => &["pnpm-lock.yaml"],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PackageManager {
    type Err = VsixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            other => Err(VsixError::UnsupportedPackageManager(other.to_string())),
        }
    }
}

/// What a single directory says about its package manager
#[derive(Debug, Clone, PartialEq, Eq)]
enum Signature {
    Supported(PackageManager),
    Unsupported(String),
}

const BUN_LOCKFILES: &[&str] = &["bun.lockb", "bun.lock"];

/// Detect the package manager for `dir`, walking up to the filesystem root
pub fn detect_package_manager(dir: &Path) -> VsixResult<PackageManager> {
    detect_package_manager_within(dir, None)
}

/// Detect the package manager for `dir`, walking upward no further than
/// `stop_at` (inclusive)
pub fn detect_package_manager_within(
    dir: &Path,
    stop_at: Option<&Path>,
) -> VsixResult<PackageManager> {
    for current in dir.ancestors() {
        if let Some(signature) = signature_in(current)? {
            tracing::debug!("Package manager signature in {}: {:?}", current.display(), signature);
            return match signature {
                Signature::Supported(manager) => Ok(manager),
                Signature::Unsupported(name) => Err(VsixError::UnsupportedPackageManager(name)),
            };
        }

        if stop_at.is_some_and(|stop| stop == current) {
            break;
        }
    }

    Err(VsixError::PackageManagerNotDetected(dir.to_path_buf()))
}

fn signature_in(dir: &Path) -> VsixResult<Option<Signature>> {
    if has_any(dir, PackageManager::Pnpm.lockfiles()) {
        return Ok(Some(Signature::Supported(PackageManager::Pnpm)));
    }

    let yarn_lock = dir.join("yarn.lock");
    if yarn_lock.is_file() {
        return Ok(Some(if is_yarn_berry(dir, &yarn_lock)? {
            Signature::Unsupported("yarn berry".to_string())
        } else {
            Signature::Supported(PackageManager::Yarn)
        }));
    }

    if has_any(dir, PackageManager::Npm.lockfiles()) {
        return Ok(Some(Signature::Supported(PackageManager::Npm)));
    }

    if has_any(dir, BUN_LOCKFILES) {
        return Ok(Some(Signature::Unsupported("bun".to_string())));
    }

    Ok(package_manager_field(dir).map(|hint| parse_hint(&hint)))
}

fn has_any(dir: &Path, names: &[&str]) -> bool {
    names.iter().any(|name| dir.join(name).is_file())
}

fn is_yarn_berry(dir: &Path, yarn_lock: &Path) -> VsixResult<bool> {
    if dir.join(".yarnrc.yml").is_file() {
        return Ok(true);
    }
    let content = fs::read_to_string(yarn_lock)?;
    let header: String = content.lines().take(5).collect::<Vec<_>>().join("\n");
    Ok(header.contains("__metadata:"))
}

/// The `packageManager` field of the directory's package.json, if any
fn package_manager_field(dir: &Path) -> Option<String> {
    let content = fs::read_to_string(dir.join(MANIFEST_FILE)).ok()?;
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Ignoring unreadable {} in {}: {}", MANIFEST_FILE, dir.display(), e);
            return None;
        }
    };
    value
        .get("packageManager")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

fn parse_hint(hint: &str) -> Signature {
    let trimmed = hint.trim();
    let (name, version) = match trimmed.split_once('@') {
        Some((name, version)) if !name.is_empty() => (name, version),
        _ => (trimmed, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "npm" => Signature::Supported(PackageManager::Npm),
        "pnpm" => Signature::Supported(PackageManager::Pnpm),
        "yarn" => match parse_major(version) {
            Some(major) if major < 2 => Signature::Supported(PackageManager::Yarn),
            _ => Signature::Unsupported("yarn berry".to_string()),
        },
        other => Signature::Unsupported(other.to_string()),
    }
}

fn parse_major(version: &str) -> Option<u64> {
    let digits: String = version
        .trim()
        .trim_start_matches(['v', 'V'])
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
