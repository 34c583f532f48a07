use std::env;
use std::path::Path;
use vsixpack::core::path::find_project_root;
use vsixpack::core::{VsixError, VsixResult};
use vsixpack::di::ServiceContainer;
use vsixpack::package::{PackOptions, Packager};

pub async fn run(
    no_dependencies: bool,
    package_manager: Option<String>,
    ignore_file: Option<String>,
) -> VsixResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| VsixError::Path(format!("Failed to get current directory: {}", e)))?;
    let options = PackOptions {
        dependencies: no_dependencies.then_some(false),
        package_manager,
        ignore_file,
        ..PackOptions::default()
    };

    for path in list_in_dir(&current_dir, ServiceContainer::new()?, &options).await? {
        println!("{}", path);
    }
    Ok(())
}

pub async fn list_in_dir(
    dir: &Path,
    container: ServiceContainer,
    options: &PackOptions,
) -> VsixResult<Vec<String>> {
    let project_root = find_project_root(dir)?;
    Packager::new(&project_root, container)
        .list_files(options)
        .await
}
