use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};

// Declare submodules
pub mod assets;
pub mod dependencies;
pub mod extension_kind;
pub mod workflow;

pub const BASE_MANIFEST: &str = r#"{
    "name": "hello",
    "displayName": "Hello World",
    "description": "Says hello",
    "publisher": "acme",
    "version": "1.2.3",
    "license": "MIT",
    "engines": {"vscode": "^1.80.0"},
    "main": "./out/extension.js",
    "keywords": ["greeting"]
}"#;

/// Test context that provides isolated environment for each test
pub struct TestContext {
    pub temp: TempDir,
    /// Extension project directory, separate from the config home
    pub project: PathBuf,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Create a new test context with isolated environment
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config_dir = temp.child("config").to_path_buf();
        std::fs::create_dir_all(&config_dir).unwrap();

        let project = temp.child("project").to_path_buf();
        std::fs::create_dir_all(&project).unwrap();

        Self { temp, project }
    }

    /// Create a Command for running vsixpack inside the project
    pub fn vsixpack(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vsixpack").unwrap();
        cmd.current_dir(&self.project);

        // Keep the user's real config out of the run
        let config_dir = self.temp.child("config").to_path_buf();
        if cfg!(target_os = "windows") {
            cmd.env("APPDATA", &config_dir);
            cmd.env("USERPROFILE", self.temp.path());
        } else if cfg!(target_os = "linux") {
            cmd.env("XDG_CONFIG_HOME", &config_dir);
            cmd.env("HOME", self.temp.path());
        } else {
            cmd.env("HOME", self.temp.path());
        }

        cmd
    }

    /// Write a file relative to the project root
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// A buildable extension: manifest, readme and compiled output
    pub fn scaffold(&self, manifest: &str) {
        self.write("package.json", manifest);
        self.write("README.md", "# Hello World\n");
        self.write("out/extension.js", "exports.activate = () => {};\n");
    }

    /// Package into `<project>/out.vsix` and return its path
    pub fn package(&self, extra_args: &[&str]) -> PathBuf {
        let out = self.project.join("out.vsix");
        self.vsixpack()
            .args(["package", "--no-prepublish", "--out"])
            .arg(&out)
            .args(extra_args)
            .assert()
            .success()
            .stderr(predicate::str::contains("Packaged"));
        out
    }

    /// Archive entry names in stored order
    pub fn entries(vsix: &Path) -> Vec<String> {
        let file = std::fs::File::open(vsix).unwrap();
        let archive = zip::ZipArchive::new(file).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    /// Content of one archive entry
    pub fn read_entry(vsix: &Path, name: &str) -> String {
        let file = std::fs::File::open(vsix).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }
}
