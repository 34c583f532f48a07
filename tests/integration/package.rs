//! Tests for `vsixpack package`

use super::common::{vsixpack_command, write_project};
use std::fs;
use tempfile::TempDir;
use vsixpack::package::read_vsix;

#[test]
fn test_package_without_package_json() {
    let temp = TempDir::new().unwrap();

    let output = vsixpack_command(temp.path())
        .args(["package", "--no-dependencies", "--no-prepublish"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("package.json"));
    assert!(stderr.contains("help:"));
}

#[test]
fn test_package_writes_default_file_name() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    write_project(&project);

    let output = vsixpack_command(temp.path())
        .args(["package", "--no-dependencies", "--no-prepublish"])
        .current_dir(&project)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let vsix = project.join("hello-0.1.0.vsix");
    assert!(vsix.exists());

    let contents = read_vsix(&vsix).unwrap();
    let paths: Vec<&str> = contents.entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths[0], "[Content_Types].xml");
    assert_eq!(paths[1], "extension.vsixmanifest");
    assert!(paths.contains(&"extension/package.json"));
    assert!(paths.contains(&"extension/out/extension.js"));
    assert!(paths.contains(&"extension/src/extension.ts"));
    assert_eq!(contents.manifest.id(), "acme.hello");
}

#[test]
fn test_package_honors_vscodeignore() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::write(temp.path().join(".vscodeignore"), "src/**\n").unwrap();
    let out = temp.path().join("dist/ext.vsix");

    let output = vsixpack_command(temp.path())
        .args(["package", "--no-dependencies", "--no-prepublish", "-o"])
        .arg(&out)
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let contents = read_vsix(&out).unwrap();
    assert!(contents
        .entries
        .iter()
        .all(|e| !e.path.starts_with("extension/src/") && e.path != "extension/.vscodeignore"));
}

#[test]
fn test_package_unsupported_package_manager() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = vsixpack_command(temp.path())
        .args(["package", "--package-manager", "bun", "--no-prepublish"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported package manager: bun"));
    assert!(!temp.path().join("hello-0.1.0.vsix").exists());
}

#[test]
fn test_package_rejects_invalid_manifest() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::write(
        temp.path().join("package.json"),
        r#"{"name":"Hello","publisher":"acme","version":"0.1.0","engines":{"vscode":"^1.80.0"}}"#,
    )
    .unwrap();

    let output = vsixpack_command(temp.path())
        .args(["package", "--no-dependencies", "--no-prepublish"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "vsix"))
        .collect();
    assert!(leftovers.is_empty());
}
