pub mod archive;
pub mod assets;
pub mod content_types;
pub mod extension_kind;
pub mod inspector;
// manifest lives in vsixpack-core, re-exported here
pub mod manifest {
    pub use vsixpack_core::package::manifest::*;
}
pub mod packager;
pub mod prepublish;
pub mod validator;
pub mod vsix_manifest;
mod xml;

pub use assets::{AssetLocator, AssetRole, LocatedAssets, ManifestAsset};
pub use extension_kind::{classify, ExtensionKind};
pub use inspector::{read_vsix, VsixContents};
pub use manifest::Manifest;
pub use packager::{PackOptions, PackageSummary, Packager};
pub use validator::ManifestValidator;
