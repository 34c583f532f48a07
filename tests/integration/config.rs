//! Tests for `vsixpack config`

use super::common::vsixpack_command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_show_defaults() {
    let temp = TempDir::new().unwrap();

    let output = vsixpack_command(temp.path())
        .args(["config", "show"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ignore_file: .vscodeignore"));
    assert!(stdout.contains("dependencies: true"));
}

#[test]
#[cfg(target_os = "linux")]
fn test_config_show_reads_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("config/vsixpack");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), "dependencies: false\n").unwrap();

    let output = vsixpack_command(temp.path())
        .args(["config", "show"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("dependencies: false"));
}

#[test]
#[cfg(target_os = "linux")]
fn test_config_path_points_into_config_home() {
    let temp = TempDir::new().unwrap();

    let output = vsixpack_command(temp.path())
        .args(["config", "path"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().ends_with("vsixpack/config.yaml"));
    assert!(stdout.contains(&*temp.path().to_string_lossy()));
}

#[test]
fn test_config_set_persists() {
    let temp = TempDir::new().unwrap();

    let output = vsixpack_command(temp.path())
        .args(["config", "set", "dependencies", "false"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = vsixpack_command(temp.path())
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).contains("dependencies: false"));
}

#[test]
fn test_config_set_unknown_key() {
    let temp = TempDir::new().unwrap();

    let output = vsixpack_command(temp.path())
        .args(["config", "set", "colour", "blue"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown config key: colour"));
}
