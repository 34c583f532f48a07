use super::*;

#[test]
fn test_package_then_show() {
    let ctx = TestContext::new();
    ctx.scaffold(BASE_MANIFEST);
    ctx.write("LICENSE.txt", "MIT License\n");
    ctx.write("CHANGELOG.md", "## 1.2.3\n");

    let vsix = ctx.package(&["--no-dependencies"]);

    ctx.vsixpack()
        .arg("show")
        .arg(&vsix)
        .assert()
        .success()
        .stdout(predicate::str::contains("acme.hello v1.2.3"))
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("extension/CHANGELOG.md"));
}

#[test]
fn test_ls_matches_archive_contents() {
    let ctx = TestContext::new();
    ctx.scaffold(BASE_MANIFEST);
    ctx.write("media/logo.png", "png");
    ctx.write(".vscodeignore", "src/**\n**/*.map\n");
    ctx.write("src/extension.ts", "export {}");
    ctx.write("out/extension.js.map", "{}");

    let listed = ctx
        .vsixpack()
        .args(["ls", "--no-dependencies"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed: Vec<String> = String::from_utf8(listed)
        .unwrap()
        .lines()
        .map(|l| format!("extension/{}", l))
        .collect();

    let vsix = ctx.package(&["--no-dependencies"]);
    let mut stored: Vec<String> = TestContext::entries(&vsix)
        .into_iter()
        .filter(|name| name.starts_with("extension/"))
        .collect();
    stored.sort();

    assert_eq!(listed, stored);
    assert!(!stored.iter().any(|name| name.ends_with(".map")));
}

#[test]
fn test_negation_reinstates_file() {
    let ctx = TestContext::new();
    ctx.scaffold(BASE_MANIFEST);
    ctx.write(".gitignore", "out/\n");
    ctx.write(".vscodeignore", "!out/extension.js\n");
    ctx.write("out/other.js", "");

    ctx.vsixpack()
        .args(["ls", "--no-dependencies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out/extension.js"))
        .stdout(predicate::str::contains("out/other.js").not());
}

#[test]
fn test_unsupported_manager_stops_before_prepublish() {
    let ctx = TestContext::new();
    ctx.scaffold(
        r#"{
            "name": "hello",
            "publisher": "acme",
            "version": "1.2.3",
            "engines": {"vscode": "^1.80.0"},
            "scripts": {"vscode:prepublish": "exit 3"}
        }"#,
    );

    ctx.vsixpack()
        .args(["package", "--no-dependencies", "--package-manager", "bun"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported package manager: bun"));

    assert!(!ctx.project.join("hello-1.2.3.vsix").exists());
}
