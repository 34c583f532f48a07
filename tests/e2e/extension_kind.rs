use super::*;

fn kind_property(vsix: &Path) -> String {
    let manifest = TestContext::read_entry(vsix, "extension.vsixmanifest");
    let marker = "Id=\"Microsoft.VisualStudio.Code.ExtensionKind\" Value=\"";
    let start = manifest.find(marker).expect("ExtensionKind property") + marker.len();
    let end = manifest[start..].find('"').unwrap();
    manifest[start..start + end].to_string()
}

#[test]
fn test_node_extension_is_workspace() {
    let ctx = TestContext::new();
    ctx.scaffold(BASE_MANIFEST);

    let vsix = ctx.package(&["--no-dependencies"]);
    assert_eq!(kind_property(&vsix), "workspace");
}

#[test]
fn test_browser_extension_is_tagged_web() {
    let ctx = TestContext::new();
    ctx.scaffold(
        r#"{
            "name": "hello",
            "publisher": "acme",
            "version": "1.2.3",
            "engines": {"vscode": "^1.80.0"},
            "browser": "./out/web.js"
        }"#,
    );
    ctx.write("out/web.js", "");

    let vsix = ctx.package(&["--no-dependencies"]);
    assert_eq!(kind_property(&vsix), "web");
    let manifest = TestContext::read_entry(&vsix, "extension.vsixmanifest");
    assert!(manifest.contains("__web_extension"));
}

#[test]
fn test_declared_ui_allows_workspace() {
    let ctx = TestContext::new();
    ctx.scaffold(&BASE_MANIFEST.replace(
        "\"keywords\"",
        "\"extensionKind\": \"ui\", \"keywords\"",
    ));

    let vsix = ctx.package(&["--no-dependencies"]);
    assert_eq!(kind_property(&vsix), "ui,workspace");
}

#[test]
fn test_theme_extension_runs_everywhere() {
    let ctx = TestContext::new();
    ctx.scaffold(
        r#"{
            "name": "midnight",
            "publisher": "acme",
            "version": "1.0.0",
            "engines": {"vscode": "^1.80.0"},
            "contributes": {"themes": [{"label": "Midnight", "path": "./themes/midnight.json"}]}
        }"#,
    );
    ctx.write("themes/midnight.json", "{}");

    let vsix = ctx.package(&["--no-dependencies"]);
    assert_eq!(kind_property(&vsix), "ui,workspace,web");
}
