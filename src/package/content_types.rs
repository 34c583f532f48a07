//! `[Content_Types].xml`: one content type per file extension in the archive

use super::xml::escape;
use crate::core::{VsixError, VsixResult};
use std::collections::BTreeMap;
use std::path::Path;

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("vsixmanifest", "text/xml"),
    ("xml", "text/xml"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("cjs", "application/javascript"),
    ("ts", "text/plain"),
    ("mts", "text/plain"),
    ("cts", "text/plain"),
    ("md", "text/markdown"),
    ("markdown", "text/markdown"),
    ("txt", "text/plain"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("scss", "text/x-scss"),
    ("yml", "text/yaml"),
    ("yaml", "text/yaml"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("bmp", "image/bmp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("wasm", "application/wasm"),
    ("node", "application/octet-stream"),
    ("sh", "application/x-sh"),
    ("py", "text/x-python"),
    ("tmlanguage", "application/xml"),
    ("plist", "application/xml"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("pdf", "application/pdf"),
];

/// Looks up content types, falling back to a configured default
pub struct ContentTypes<'a> {
    fallback: Option<&'a str>,
}

impl<'a> ContentTypes<'a> {
    pub fn new(fallback: Option<&'a str>) -> Self {
        Self { fallback }
    }

    /// Content type for a lower-case extension without the dot
    pub fn lookup(&self, extension: &str) -> VsixResult<&'a str> {
        BUILTIN_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, content_type)| *content_type)
            .or(self.fallback)
            .ok_or_else(|| VsixError::MissingContentType(format!(".{}", extension)))
    }

    /// Render the XML for the given archive paths. Paths without an
    /// extension contribute nothing.
    pub fn render<'p>(
        &self,
        archive_paths: impl IntoIterator<Item = &'p str>,
    ) -> VsixResult<String> {
        let mut defaults = BTreeMap::new();
        for path in archive_paths {
            let Some(extension) = Path::new(path).extension().and_then(|e| e.to_str()) else {
                continue;
            };
            let extension = extension.to_ascii_lowercase();
            if defaults.contains_key(&extension) {
                continue;
            }
            let content_type = self.lookup(&extension)?;
            defaults.insert(extension, content_type);
        }

        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\n",
        );
        for (extension, content_type) in defaults {
            xml.push_str(&format!(
                "  <Default Extension=\".{}\" ContentType=\"{}\"/>\n",
                escape(&extension),
                escape(content_type)
            ));
        }
        xml.push_str("</Types>\n");
        Ok(xml)
    }
}
