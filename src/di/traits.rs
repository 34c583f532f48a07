//! Trait definitions for dependency injection

use crate::core::VsixResult;
use async_trait::async_trait;
use std::path::Path;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Name of the tool-specific ignore file (e.g. ".vscodeignore")
    fn ignore_file(&self) -> &str;

    /// Name of the general-purpose ignore file (e.g. ".gitignore")
    fn general_ignore_file(&self) -> &str;

    /// Whether production dependencies get bundled
    fn bundle_dependencies(&self) -> bool;

    /// Forced package manager name, if any
    fn package_manager(&self) -> Option<&str>;

    /// Content type for extensions missing from the built-in table
    fn content_type_fallback(&self) -> Option<&str>;

    /// Whether the `vscode:prepublish` script runs before packaging
    fn run_prepublish(&self) -> bool;
}

/// Captured result of an external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Trait for running external programs (package manager CLIs)
///
/// The only process boundary in the packaging pipeline. No stdin is
/// provided; the working directory is the sole context besides arguments.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd` and capture its output
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> VsixResult<CommandOutput>;
}
