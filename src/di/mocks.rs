//! Mock implementations of service traits for testing

use super::traits::{CommandOutput, CommandRunner, ConfigProvider};
use crate::core::{VsixError, VsixResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use vsixpack::di::mocks::MockConfigProvider;
/// use vsixpack::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.dependencies = false;
///
/// assert_eq!(config.bundle_dependencies(), false);
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub ignore_file: String,
    pub general_ignore_file: String,
    pub dependencies: bool,
    pub package_manager: Option<String>,
    pub content_type_fallback: Option<String>,
    pub run_prepublish: bool,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            ignore_file: ".vscodeignore".to_string(),
            general_ignore_file: ".gitignore".to_string(),
            dependencies: true,
            package_manager: None,
            content_type_fallback: Some("application/octet-stream".to_string()),
            run_prepublish: false,
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn ignore_file(&self) -> &str {
        &self.ignore_file
    }

    fn general_ignore_file(&self) -> &str {
        &self.general_ignore_file
    }

    fn bundle_dependencies(&self) -> bool {
        self.dependencies
    }

    fn package_manager(&self) -> Option<&str> {
        self.package_manager.as_deref()
    }

    fn content_type_fallback(&self) -> Option<&str> {
        self.content_type_fallback.as_deref()
    }

    fn run_prepublish(&self) -> bool {
        self.run_prepublish
    }
}

/// A command the mock runner saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Mock command runner for testing
///
/// Replies with canned output registered per program name and records
/// every invocation. Unregistered programs fail like a missing executable.
///
/// # Example
///
/// ```
/// use vsixpack::di::mocks::MockCommandRunner;
///
/// let runner = MockCommandRunner::new();
/// runner.respond("npm", "/project\n/project/node_modules/left-pad\n");
/// assert!(runner.calls().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct MockCommandRunner {
    responses: Arc<Mutex<HashMap<String, CommandOutput>>>,
    calls: Arc<Mutex<Vec<RecordedCommand>>>,
}

impl MockCommandRunner {
    /// Create a new mock command runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `program` with a successful exit and the given stdout
    pub fn respond(&self, program: &str, stdout: &str) {
        self.respond_with(
            program,
            CommandOutput {
                code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    /// Reply to `program` with an arbitrary output
    pub fn respond_with(&self, program: &str, output: CommandOutput) {
        self.responses
            .lock()
            .unwrap()
            .insert(program.to_string(), output);
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> VsixResult<CommandOutput> {
        self.calls.lock().unwrap().push(RecordedCommand {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        });

        self.responses
            .lock()
            .unwrap()
            .get(program)
            .cloned()
            .ok_or_else(|| VsixError::CommandFailed {
                command: program.to_string(),
                code: None,
                stderr: format!("'{}' not found on PATH", program),
            })
    }
}
