use std::path::PathBuf;
use thiserror::Error;

pub type VsixResult<T> = Result<T, VsixError>;

#[derive(Error, Debug)]
pub enum VsixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// No package.json at the expected location.
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// package.json exists but could not be read as a manifest.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// An ignore-file or glob pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("unsupported package manager: {0}")]
    UnsupportedPackageManager(String),

    #[error("No package manager detected at or above {}", .0.display())]
    PackageManagerNotDetected(PathBuf),

    /// Package manager output could not be parsed.
    #[error("Parse error: {0}")]
    ParseFailure(String),

    #[error("Command `{command}` failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Missing asset: {0}")]
    MissingAsset(String),

    #[error("No content type known for file extension '{0}'")]
    MissingContentType(String),

    #[error("Archive error: {0}")]
    Archive(String),
}
