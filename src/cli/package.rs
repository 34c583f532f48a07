use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vsixpack::core::path::find_project_root;
use vsixpack::core::{VsixError, VsixResult};
use vsixpack::di::ServiceContainer;
use vsixpack::package::extension_kind;
use vsixpack::package::{PackOptions, Packager};

/// Flags of `vsixpack package`
pub struct PackageArgs {
    pub out: Option<PathBuf>,
    pub no_dependencies: bool,
    pub package_manager: Option<String>,
    pub packaged_dependency: Vec<String>,
    pub readme_path: Option<String>,
    pub ignore_file: Option<String>,
    pub no_prepublish: bool,
}

impl PackageArgs {
    fn into_options(self) -> PackOptions {
        PackOptions {
            output: self.out,
            // Unset flags defer to the config file
            dependencies: self.no_dependencies.then_some(false),
            package_manager: self.package_manager,
            packaged_dependencies: if self.packaged_dependency.is_empty() {
                None
            } else {
                Some(self.packaged_dependency)
            },
            readme_path: self.readme_path,
            ignore_file: self.ignore_file,
            prepublish: self.no_prepublish.then_some(false),
        }
    }
}

pub async fn run(args: PackageArgs) -> VsixResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| VsixError::Path(format!("Failed to get current directory: {}", e)))?;
    let container = ServiceContainer::new()?;
    run_in_dir(&current_dir, container, args).await
}

pub async fn run_in_dir(
    dir: &Path,
    container: ServiceContainer,
    args: PackageArgs,
) -> VsixResult<()> {
    let project_root = find_project_root(dir)?;
    let packager = Packager::new(&project_root, container);
    let options = args.into_options();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message("Packaging extension...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = packager.pack(&options).await;
    spinner.finish_and_clear();
    let summary = result?;

    eprintln!(
        "✓ Packaged {} v{} ({})",
        summary.id,
        summary.version,
        extension_kind::join(&summary.kinds)
    );
    eprintln!(
        "  {} ({} files, {})",
        summary.written.path.display(),
        summary.written.entries,
        format_size(summary.written.bytes)
    );

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{} B", bytes)
    } else if bytes_f < KB * KB {
        format!("{:.2} KB", bytes_f / KB)
    } else {
        format!("{:.2} MB", bytes_f / (KB * KB))
    }
}
