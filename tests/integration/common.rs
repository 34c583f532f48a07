//! Common utilities for integration tests

use std::fs;
use std::path::Path;
use std::process::Command;

pub const MANIFEST: &str = r#"{
    "name": "hello",
    "displayName": "Hello",
    "publisher": "acme",
    "version": "0.1.0",
    "engines": {"vscode": "^1.80.0"},
    "main": "./out/extension.js"
}"#;

/// The binary, with its config directory pointed into `home`
pub fn vsixpack_command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vsixpack"));
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("APPDATA", home.join("config"));
    cmd
}

/// A minimal extension project with compiled output and sources
pub fn write_project(root: &Path) {
    fs::write(root.join("package.json"), MANIFEST).unwrap();
    fs::write(root.join("README.md"), "# Hello").unwrap();
    fs::create_dir_all(root.join("out")).unwrap();
    fs::write(root.join("out/extension.js"), "exports.activate = () => {};").unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/extension.ts"), "export function activate() {}").unwrap();
}
