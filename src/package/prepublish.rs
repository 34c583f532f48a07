use crate::core::{VsixError, VsixResult};
use crate::di::traits::CommandRunner;
use crate::package::Manifest;
use crate::resolver::PackageManager;
use std::path::Path;

pub const PREPUBLISH_SCRIPT: &str = "vscode:prepublish";

/// Run the manifest's `vscode:prepublish` script with `manager`.
///
/// Returns whether a script ran. A non-zero exit fails packaging.
pub async fn run_prepublish(
    runner: &dyn CommandRunner,
    manager: PackageManager,
    manifest: &Manifest,
    cwd: &Path,
) -> VsixResult<bool> {
    if !manifest.has_script(PREPUBLISH_SCRIPT) {
        return Ok(false);
    }

    let program = manager.program();
    let args = ["run", PREPUBLISH_SCRIPT];
    tracing::info!("Executing prepublish script '{} {}'", program, args.join(" "));

    let output = runner.run(program, &args, cwd).await?;
    if !output.stdout.trim().is_empty() {
        tracing::debug!("{}", output.stdout.trim_end());
    }

    if !output.success() {
        return Err(VsixError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(true)
}
