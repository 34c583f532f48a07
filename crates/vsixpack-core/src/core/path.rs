use crate::core::error::{VsixError, VsixResult};
use std::path::{Path, PathBuf};

/// Name of the manifest file every extension project carries.
pub const MANIFEST_FILE: &str = "package.json";

/// Get the Vsixpack home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\vsixpack
/// - Linux: ~/.config/vsixpack
/// - macOS: ~/Library/Application Support/vsixpack
pub fn vsixpack_home() -> VsixResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| VsixError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("vsixpack"))
}

/// Get the config file path
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\vsixpack\config.yaml
/// - Linux: ~/.config/vsixpack/config.yaml
/// - macOS: ~/Library/Application Support/vsixpack/config.yaml
pub fn config_file() -> VsixResult<PathBuf> {
    Ok(vsixpack_home()?.join("config.yaml"))
}

/// Find the project root by looking for package.json in `start` or its parents
pub fn find_project_root(start: &Path) -> VsixResult<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(MANIFEST_FILE).is_file() {
            return Ok(current);
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            return Err(VsixError::ManifestNotFound(start.join(MANIFEST_FILE)));
        }
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> VsixResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Render a relative path with forward slashes, as archive entries and
/// ignore patterns expect.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
