use std::path::Path;
use vsixpack::core::VsixResult;
use vsixpack::package::read_vsix;

pub fn run(vsix: &Path) -> VsixResult<()> {
    let contents = read_vsix(vsix)?;
    let manifest = &contents.manifest;

    println!("{} v{}", manifest.id(), manifest.version);
    if let Some(display_name) = &manifest.display_name {
        println!("  {}", display_name);
    }
    println!("\n{} files:", contents.entries.len());
    for entry in &contents.entries {
        println!("  {:>10}  {}", entry.size, entry.path);
    }

    Ok(())
}
