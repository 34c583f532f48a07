//! Tests for `vsixpack show`

use super::common::{vsixpack_command, write_project};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_show_packaged_extension() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    let out = temp.path().join("hello.vsix");

    let status = vsixpack_command(temp.path())
        .args(["package", "--no-dependencies", "--no-prepublish", "--out"])
        .arg(&out)
        .current_dir(temp.path())
        .status()
        .unwrap();
    assert!(status.success());

    let output = vsixpack_command(temp.path())
        .arg("show")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("acme.hello v0.1.0"));
    assert!(stdout.contains("extension/out/extension.js"));
}

#[test]
fn test_show_rejects_non_archive() {
    let temp = TempDir::new().unwrap();
    let bogus = temp.path().join("bogus.vsix");
    fs::write(&bogus, "not a zip").unwrap();

    let output = vsixpack_command(temp.path())
        .arg("show")
        .arg(&bogus)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a valid vsix"));
}
