use crate::core::error::VsixError;

/// Suggestions shown under an error when the CLI reports it
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for VsixError {
    fn help(&self) -> Option<String> {
        match self {
            VsixError::ManifestNotFound(_) => Some(
                "Run vsixpack from an extension project directory containing package.json"
                    .to_string(),
            ),
            VsixError::InvalidManifest(_) => {
                Some("Check package.json for JSON syntax errors".to_string())
            }
            VsixError::UnsupportedPackageManager(_) => Some(
                "Supported package managers are npm, yarn (classic) and pnpm. \
                 Use --no-dependencies to skip dependency bundling"
                    .to_string(),
            ),
            VsixError::PackageManagerNotDetected(_) => Some(
                "Run your package manager's install command to create a lock file, \
                 or pass --package-manager"
                    .to_string(),
            ),
            VsixError::CommandFailed { .. } => Some(
                "Make sure dependencies are installed and the package manager is on PATH"
                    .to_string(),
            ),
            VsixError::MissingAsset(_) => Some(
                "Check that the file exists and is not excluded by .vscodeignore".to_string(),
            ),
            VsixError::MissingContentType(_) => Some(
                "Set content_type_fallback in the vsixpack config or exclude the file"
                    .to_string(),
            ),
            VsixError::Config(_) | VsixError::Yaml(_) => {
                Some("Run `vsixpack config path` to locate the config file".to_string())
            }
            _ => None,
        }
    }
}

/// Render an error together with its suggestion, if it has one
pub fn format_error_with_help(error: &VsixError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n  help: {}", error, help),
        None => format!("Error: {}", error),
    }
}
