//! `extension.vsixmanifest`, the package description the marketplace and
//! the editor read.

use super::assets::{AssetRole, ManifestAsset};
use super::extension_kind::{self, ExtensionKind};
use super::xml::escape;
use crate::package::Manifest;
use std::collections::BTreeSet;

pub const VSIX_MANIFEST_PATH: &str = "extension.vsixmanifest";

/// Everything the vsix manifest is rendered from
pub struct VsixManifest<'a> {
    pub manifest: &'a Manifest,
    pub kinds: &'a BTreeSet<ExtensionKind>,
    pub assets: &'a [ManifestAsset],
}

impl<'a> VsixManifest<'a> {
    pub fn new(
        manifest: &'a Manifest,
        kinds: &'a BTreeSet<ExtensionKind>,
        assets: &'a [ManifestAsset],
    ) -> Self {
        Self {
            manifest,
            kinds,
            assets,
        }
    }

    pub fn render(&self) -> String {
        let m = self.manifest;
        let mut xml = String::new();

        xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        xml.push_str(
            "<PackageManifest Version=\"2.0.0\" \
             xmlns=\"http://schemas.microsoft.com/developer/vsx-schema/2011\" \
             xmlns:d=\"http://schemas.microsoft.com/developer/vsx-schema-design/2011\">\n",
        );
        xml.push_str("  <Metadata>\n");
        xml.push_str(&format!(
            "    <Identity Language=\"en-US\" Id=\"{}\" Version=\"{}\" Publisher=\"{}\"/>\n",
            escape(&m.name),
            escape(&m.version),
            escape(&m.publisher)
        ));
        xml.push_str(&format!(
            "    <DisplayName>{}</DisplayName>\n",
            escape(m.display_name.as_deref().unwrap_or(&m.name))
        ));
        xml.push_str(&format!(
            "    <Description xml:space=\"preserve\">{}</Description>\n",
            escape(m.description.as_deref().unwrap_or_default())
        ));
        xml.push_str(&format!("    <Tags>{}</Tags>\n", escape(&self.tags())));
        xml.push_str(&format!(
            "    <Categories>{}</Categories>\n",
            escape(&m.categories.join(","))
        ));
        xml.push_str(&format!(
            "    <GalleryFlags>{}</GalleryFlags>\n",
            if m.preview { "Public Preview" } else { "Public" }
        ));

        xml.push_str("    <Properties>\n");
        for (id, value) in self.properties() {
            xml.push_str(&format!(
                "      <Property Id=\"{}\" Value=\"{}\"/>\n",
                id,
                escape(&value)
            ));
        }
        xml.push_str("    </Properties>\n");

        if let Some(license) = self.asset_path(&AssetRole::License) {
            xml.push_str(&format!("    <License>{}</License>\n", escape(license)));
        }
        if let Some(icon) = self.asset_path(&AssetRole::Icon) {
            xml.push_str(&format!("    <Icon>{}</Icon>\n", escape(icon)));
        }
        xml.push_str("  </Metadata>\n");

        xml.push_str("  <Installation>\n");
        xml.push_str("    <InstallationTarget Id=\"Microsoft.VisualStudio.Code\"/>\n");
        xml.push_str("  </Installation>\n");
        xml.push_str("  <Dependencies/>\n");

        xml.push_str("  <Assets>\n");
        for asset in self.assets {
            xml.push_str(&format!(
                "    <Asset Type=\"{}\" Path=\"{}\" Addressable=\"true\"/>\n",
                escape(&asset.role.asset_type()),
                escape(&asset.path)
            ));
        }
        xml.push_str("  </Assets>\n");
        xml.push_str("</PackageManifest>\n");

        xml
    }

    fn asset_path(&self, role: &AssetRole) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| &asset.role == role)
            .map(|asset| asset.path.as_str())
    }

    /// Keywords plus a tag per contributed language or theme kind
    fn tags(&self) -> String {
        let mut tags: Vec<String> = Vec::new();
        let mut push = |tag: String| {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        };

        for keyword in &self.manifest.keywords {
            push(keyword.clone());
        }

        let contribution_tags = [
            ("themes", "theme"),
            ("iconThemes", "icon-theme"),
            ("snippets", "snippet"),
            ("keybindings", "keybindings"),
            ("debuggers", "debuggers"),
            ("jsonValidation", "json"),
        ];
        let keys = self.manifest.contribution_keys();
        for (key, tag) in contribution_tags {
            if keys.contains(&key) {
                push(tag.to_string());
            }
        }

        if self.kinds.contains(&ExtensionKind::Web) {
            push("__web_extension".to_string());
        }

        tags.join(",")
    }

    fn properties(&self) -> Vec<(&'static str, String)> {
        let m = self.manifest;
        let mut properties = vec![
            (
                "Microsoft.VisualStudio.Code.Engine",
                m.vscode_engine().unwrap_or("*").to_string(),
            ),
            (
                "Microsoft.VisualStudio.Code.ExtensionDependencies",
                m.extension_dependencies.clone().unwrap_or_default().join(","),
            ),
            (
                "Microsoft.VisualStudio.Code.ExtensionPack",
                m.extension_pack.clone().unwrap_or_default().join(","),
            ),
            (
                "Microsoft.VisualStudio.Code.ExtensionKind",
                extension_kind::join(self.kinds),
            ),
        ];

        if let Some(url) = m.repository.as_ref().and_then(|r| r.url()) {
            properties.push(("Microsoft.VisualStudio.Services.Links.Source", url.to_string()));
        }
        if let Some(url) = m.bugs.as_ref().and_then(|b| b.url()) {
            properties.push(("Microsoft.VisualStudio.Services.Links.Support", url.to_string()));
        }
        if let Some(url) = &m.homepage {
            properties.push(("Microsoft.VisualStudio.Services.Links.Learn", url.clone()));
        }

        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_identity_and_assets() {
        let manifest: Manifest = serde_json::from_value(json!({
            "name": "ext",
            "displayName": "Ext & Co",
            "version": "1.2.3",
            "publisher": "acme",
            "description": "Does <things>",
            "engines": {"vscode": "^1.80.0"},
            "keywords": ["lint"],
            "categories": ["Linters", "Other"],
            "repository": {"type": "git", "url": "https://example.com/ext.git"},
            "extensionDependencies": ["acme.base"]
        }))
        .unwrap();
        let kinds: BTreeSet<_> = [ExtensionKind::Workspace, ExtensionKind::Web].into();
        let assets = vec![
            ManifestAsset {
                role: AssetRole::Manifest,
                path: "extension/package.json".to_string(),
            },
            ManifestAsset {
                role: AssetRole::License,
                path: "extension/LICENSE.md".to_string(),
            },
        ];

        let xml = VsixManifest::new(&manifest, &kinds, &assets).render();

        assert!(xml.contains(
            "<Identity Language=\"en-US\" Id=\"ext\" Version=\"1.2.3\" Publisher=\"acme\"/>"
        ));
        assert!(xml.contains("<DisplayName>Ext &amp; Co</DisplayName>"));
        assert!(xml.contains("Does &lt;things&gt;"));
        assert!(xml.contains("<Tags>lint,__web_extension</Tags>"));
        assert!(xml.contains("<Categories>Linters,Other</Categories>"));
        assert!(xml.contains("Id=\"Microsoft.VisualStudio.Code.Engine\" Value=\"^1.80.0\""));
        assert!(xml.contains(
            "Id=\"Microsoft.VisualStudio.Code.ExtensionKind\" Value=\"workspace,web\""
        ));
        assert!(xml.contains(
            "Id=\"Microsoft.VisualStudio.Code.ExtensionDependencies\" Value=\"acme.base\""
        ));
        assert!(xml.contains("Value=\"https://example.com/ext.git\""));
        assert!(xml.contains("<License>extension/LICENSE.md</License>"));
        assert!(xml.contains(
            "<Asset Type=\"Microsoft.VisualStudio.Code.Manifest\" Path=\"extension/package.json\" Addressable=\"true\"/>"
        ));
        assert!(!xml.contains("<Icon>"));
    }

    #[test]
    fn test_preview_flag() {
        let mut manifest = Manifest::new("ext", "acme", "0.0.1");
        manifest.preview = true;
        let kinds: BTreeSet<_> = [ExtensionKind::Workspace].into();
        let xml = VsixManifest::new(&manifest, &kinds, &[]).render();
        assert!(xml.contains("<GalleryFlags>Public Preview</GalleryFlags>"));
        assert!(xml.contains("<DisplayName>ext</DisplayName>"));
    }
}
