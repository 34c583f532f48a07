//! Production command runner backed by tokio processes

use super::traits::{CommandOutput, CommandRunner};
use crate::core::{VsixError, VsixResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Runs programs found on PATH
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> VsixResult<CommandOutput> {
        // Resolve through PATH first so Windows shims (npm.cmd) are found
        // and a missing tool reports its name instead of a bare IO error.
        let executable = which::which(program).map_err(|e| VsixError::CommandFailed {
            command: program.to_string(),
            code: None,
            stderr: format!("'{}' not found on PATH: {}", program, e),
        })?;

        tracing::debug!(
            "Running {} {} in {}",
            executable.display(),
            args.join(" "),
            cwd.display()
        );

        let output = Command::new(&executable)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
