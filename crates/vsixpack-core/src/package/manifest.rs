//! The extension manifest (`package.json`).
//!
//! Only the fields packaging reads are modeled; everything else in the file
//! is ignored on load and never written back.

use crate::core::error::{VsixError, VsixResult};
use crate::core::path::MANIFEST_FILE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub publisher: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub engines: BTreeMap<String, String>,

    /// Node entry point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Web worker entry point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_kind: Option<ExtensionKindDeclaration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_pack: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_dependencies: Option<Vec<String>>,

    /// Contribution points, kept raw since only their keys and a few
    /// well-known entries are inspected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributes: Option<Map<String, Value>>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub scripts: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<UrlOrObject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugs: Option<UrlOrObject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub preview: bool,
}

/// `extensionKind` is either a single kind or a list of kinds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExtensionKindDeclaration {
    Single(String),
    Many(Vec<String>),
}

/// `repository` and `bugs` accept a bare URL or `{ "url": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UrlOrObject {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

impl UrlOrObject {
    pub fn url(&self) -> Option<&str> {
        match self {
            UrlOrObject::Url(url) => Some(url),
            UrlOrObject::Object { url } => url.as_deref(),
        }
    }
}

/// One entry of `contributes.localizations`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    pub language_id: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub id: String,
    pub path: String,
}

impl Manifest {
    /// Create a minimal manifest, mostly useful in tests
    pub fn new(name: &str, publisher: &str, version: &str) -> Self {
        let mut engines = BTreeMap::new();
        engines.insert("vscode".to_string(), "^1.60.0".to_string());
        Self {
            name: name.to_string(),
            publisher: publisher.to_string(),
            version: version.to_string(),
            engines,
            ..Self::default()
        }
    }

    /// Load package.json from a project root.
    ///
    /// A missing file is `ManifestNotFound`; unreadable JSON is `InvalidManifest`.
    pub fn load(project_root: &Path) -> VsixResult<Self> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(VsixError::ManifestNotFound(path));
        }

        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Parse manifest JSON
    pub fn parse(content: &str) -> VsixResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| VsixError::InvalidManifest(format!("{}: {}", MANIFEST_FILE, e)))
    }

    /// `<publisher>.<name>`
    pub fn id(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }

    /// The `engines.vscode` range, if declared
    pub fn vscode_engine(&self) -> Option<&str> {
        self.engines.get("vscode").map(String::as_str)
    }

    /// Names of the contribution points the manifest declares
    pub fn contribution_keys(&self) -> Vec<&str> {
        self.contributes
            .as_ref()
            .map(|c| c.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Parsed `contributes.localizations`; malformed entries are skipped
    pub fn localizations(&self) -> Vec<Localization> {
        let Some(Value::Array(entries)) = self
            .contributes
            .as_ref()
            .and_then(|c| c.get("localizations"))
        else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect()
    }

    pub fn has_script(&self, script: &str) -> bool {
        self.scripts.contains_key(script)
    }
}
