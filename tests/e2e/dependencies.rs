//! Dependency bundling through stand-in package manager executables

use super::*;

const MANIFEST_WITH_DEPS: &str = r#"{
    "name": "hello",
    "publisher": "acme",
    "version": "1.2.3",
    "engines": {"vscode": "^1.80.0"},
    "main": "./out/extension.js",
    "scripts": {"vscode:prepublish": "tsc"},
    "dependencies": {"left-pad": "1.3.0"}
}"#;

/// Put an executable shell script named `name` into a private bin dir
#[cfg(unix)]
fn fake_tool(ctx: &TestContext, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = ctx.temp.child("bin").to_path_buf();
    std::fs::create_dir_all(&bin).unwrap();
    let script = bin.join(name);
    std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    bin
}

#[cfg(unix)]
fn path_with(bin: &Path) -> std::ffi::OsString {
    let mut paths = vec![bin.to_path_buf()];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).unwrap()
}

fn install_left_pad(ctx: &TestContext) {
    ctx.write("node_modules/left-pad/package.json", r#"{"name":"left-pad"}"#);
    ctx.write("node_modules/left-pad/index.js", "module.exports = 1;\n");
    ctx.write("node_modules/devtool/index.js", "");
}

#[test]
#[cfg(unix)]
fn test_npm_dependencies_are_bundled() {
    let ctx = TestContext::new();
    ctx.scaffold(MANIFEST_WITH_DEPS);
    ctx.write("package-lock.json", "{}");
    install_left_pad(&ctx);
    let bin = fake_tool(
        &ctx,
        "npm",
        r#"case "$1" in
  list) pwd -P; echo "$(pwd -P)/node_modules/left-pad" ;;
  run) exit 0 ;;
esac"#,
    );

    let out = ctx.project.join("deps.vsix");
    ctx.vsixpack()
        .env("PATH", path_with(&bin))
        .args(["package", "--out"])
        .arg(&out)
        .assert()
        .success();

    let entries = TestContext::entries(&out);
    assert!(entries.contains(&"extension/node_modules/left-pad/index.js".to_string()));
    assert!(!entries.iter().any(|e| e.contains("devtool")));
    assert!(!entries.iter().any(|e| e.ends_with("package-lock.json")));
}

#[test]
#[cfg(unix)]
fn test_yarn_dependencies_are_bundled() {
    let ctx = TestContext::new();
    ctx.scaffold(MANIFEST_WITH_DEPS);
    ctx.write("yarn.lock", "# yarn lockfile v1\n");
    install_left_pad(&ctx);
    let bin = fake_tool(
        &ctx,
        "yarn",
        r#"echo '{"type":"info","data":"listing"}'
echo '{"type":"tree","data":{"type":"list","trees":[{"name":"left-pad@1.3.0","children":[]}]}}'"#,
    );

    ctx.vsixpack()
        .env("PATH", path_with(&bin))
        .args(["ls", "--package-manager", "yarn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("node_modules/left-pad/index.js"))
        .stdout(predicate::str::contains("devtool").not());
}

#[test]
#[cfg(unix)]
fn test_failing_list_command_aborts() {
    let ctx = TestContext::new();
    ctx.scaffold(MANIFEST_WITH_DEPS);
    ctx.write("pnpm-lock.yaml", "lockfileVersion: '6.0'\n");
    let bin = fake_tool(&ctx, "pnpm", "echo 'ERR_PNPM_NO_IMPORTER' >&2\nexit 1");

    ctx.vsixpack()
        .env("PATH", path_with(&bin))
        .args(["package", "--no-prepublish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pnpm list"))
        .stderr(predicate::str::contains("ERR_PNPM_NO_IMPORTER"));

    assert!(!ctx.project.join("hello-1.2.3.vsix").exists());
}

#[test]
#[cfg(unix)]
fn test_failing_prepublish_writes_nothing() {
    let ctx = TestContext::new();
    ctx.scaffold(MANIFEST_WITH_DEPS);
    ctx.write("package-lock.json", "{}");
    let bin = fake_tool(&ctx, "npm", "echo 'tsc: error TS2304' >&2\nexit 2");

    ctx.vsixpack()
        .env("PATH", path_with(&bin))
        .args(["package", "--no-dependencies"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vscode:prepublish"));

    assert!(!ctx.project.join("hello-1.2.3.vsix").exists());
}

#[test]
fn test_undetectable_manager_fails() {
    let ctx = TestContext::new();
    ctx.scaffold(MANIFEST_WITH_DEPS);

    ctx.vsixpack()
        .args(["ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--package-manager"));
}
