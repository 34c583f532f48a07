use super::*;

#[test]
fn test_extensionless_license_is_renamed() {
    let ctx = TestContext::new();
    ctx.scaffold(BASE_MANIFEST);
    ctx.write("LICENSE", "MIT License\n");

    let vsix = ctx.package(&["--no-dependencies"]);
    let entries = TestContext::entries(&vsix);
    assert!(entries.contains(&"extension/LICENSE.md".to_string()));
    assert!(!entries.contains(&"extension/LICENSE".to_string()));

    let manifest = TestContext::read_entry(&vsix, "extension.vsixmanifest");
    assert!(manifest.contains("<License>extension/LICENSE.md</License>"));
}

#[test]
fn test_missing_icon_fails() {
    let ctx = TestContext::new();
    ctx.scaffold(&BASE_MANIFEST.replace(
        "\"license\": \"MIT\",",
        "\"license\": \"MIT\", \"icon\": \"images/icon.png\",",
    ));

    ctx.vsixpack()
        .args(["package", "--no-dependencies", "--no-prepublish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing asset"))
        .stderr(predicate::str::contains("images/icon.png"));

    assert!(!ctx.project.join("hello-1.2.3.vsix").exists());
}

#[test]
fn test_svg_icon_rejected() {
    let ctx = TestContext::new();
    ctx.scaffold(&BASE_MANIFEST.replace(
        "\"license\": \"MIT\",",
        "\"license\": \"MIT\", \"icon\": \"images/icon.svg\",",
    ));
    ctx.write("images/icon.svg", "<svg/>");

    ctx.vsixpack()
        .args(["package", "--no-dependencies", "--no-prepublish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SVGs can't be used as icons"));
}

#[test]
fn test_readme_override() {
    let ctx = TestContext::new();
    ctx.scaffold(BASE_MANIFEST);
    ctx.write("docs/MARKETPLACE.md", "# Store page\n");

    let vsix = ctx.package(&["--no-dependencies", "--readme-path", "docs/MARKETPLACE.md"]);
    let manifest = TestContext::read_entry(&vsix, "extension.vsixmanifest");
    assert!(manifest.contains("Microsoft.VisualStudio.Services.Content.Details"));
    assert!(manifest.contains("extension/docs/MARKETPLACE.md"));
}

#[test]
fn test_content_types_cover_stored_extensions() {
    let ctx = TestContext::new();
    ctx.scaffold(BASE_MANIFEST);
    ctx.write("media/logo.png", "png");

    let vsix = ctx.package(&["--no-dependencies"]);
    let types = TestContext::read_entry(&vsix, "[Content_Types].xml");
    for ext in [".js", ".json", ".md", ".png", ".vsixmanifest"] {
        assert!(
            types.contains(&format!("Extension=\"{}\"", ext)),
            "missing {} in {}",
            ext,
            types
        );
    }
}
