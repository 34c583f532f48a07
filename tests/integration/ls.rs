//! Tests for `vsixpack ls`

use super::common::{vsixpack_command, write_project};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_ls_lists_sorted_paths() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = vsixpack_command(temp.path())
        .args(["ls", "--no-dependencies"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["README.md", "out/extension.js", "package.json", "src/extension.ts"]
    );
}

#[test]
fn test_ls_skips_node_modules_without_dependencies() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::create_dir_all(temp.path().join("node_modules/left-pad")).unwrap();
    fs::write(temp.path().join("node_modules/left-pad/index.js"), "").unwrap();

    let output = vsixpack_command(temp.path())
        .args(["ls", "--package-manager", "none"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("node_modules"));
}

#[test]
fn test_ls_with_custom_ignore_file() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::write(temp.path().join(".vscodeignore"), "out/**\n").unwrap();
    fs::write(temp.path().join(".packignore"), "src/**\n").unwrap();

    let output = vsixpack_command(temp.path())
        .args(["ls", "--no-dependencies", "--ignore-file", ".packignore"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("out/extension.js"));
    assert!(stdout.contains(".vscodeignore"));
    assert!(!stdout.contains("src/extension.ts"));
    assert!(!stdout.contains(".packignore"));
}
