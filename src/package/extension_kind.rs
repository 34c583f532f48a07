//! Where an extension can run: the UI process, the workspace (remote)
//! process, or a browser sandbox.

use crate::core::{VsixError, VsixResult};
use crate::package::manifest::ExtensionKindDeclaration;
use crate::package::Manifest;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Ordered ui, workspace, web; sets of kinds iterate in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionKind {
    Ui,
    Workspace,
    Web,
}

impl ExtensionKind {
    pub const ALL: [ExtensionKind; 3] = [
        ExtensionKind::Ui,
        ExtensionKind::Workspace,
        ExtensionKind::Web,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionKind::Ui => "ui",
            ExtensionKind::Workspace => "workspace",
            ExtensionKind::Web => "web",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionKind {
    type Err = VsixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ui" => Ok(ExtensionKind::Ui),
            "workspace" => Ok(ExtensionKind::Workspace),
            "web" => Ok(ExtensionKind::Web),
            other => Err(VsixError::Validation(format!(
                "Unknown extensionKind '{}'. Expected 'ui', 'workspace' or 'web'",
                other
            ))),
        }
    }
}

/// Contribution points that only make sense in some kinds.
/// Every entry is non-empty and contains `workspace`.
const CONTRIBUTION_KINDS: &[(&str, &[ExtensionKind])] = &[
    ("jsonValidation", &[ExtensionKind::Workspace, ExtensionKind::Web]),
    ("localizations", &[ExtensionKind::Ui, ExtensionKind::Workspace]),
    ("debuggers", &[ExtensionKind::Workspace]),
    ("terminal", &[ExtensionKind::Workspace]),
    ("typescriptServerPlugins", &[ExtensionKind::Workspace]),
    ("markdown.previewStyles", &[ExtensionKind::Workspace, ExtensionKind::Web]),
    ("markdown.previewScripts", &[ExtensionKind::Workspace, ExtensionKind::Web]),
    ("markdown.markdownItPlugins", &[ExtensionKind::Workspace, ExtensionKind::Web]),
    ("html.customData", &[ExtensionKind::Workspace, ExtensionKind::Web]),
    ("css.customData", &[ExtensionKind::Workspace, ExtensionKind::Web]),
];

fn contribution_kinds(key: &str) -> Option<&'static [ExtensionKind]> {
    CONTRIBUTION_KINDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kinds)| *kinds)
}

/// Classify the manifest. The result is never empty.
///
/// An explicit declaration wins; a bare `"ui"` also allows `workspace`, and
/// a declared browser entry point adds `web`. Otherwise kinds are inferred
/// from entry points, then from extension packs and dependencies, and
/// finally by narrowing the full set with the contribution points present.
/// An explicitly empty declaration is treated as absent.
pub fn classify(manifest: &Manifest) -> VsixResult<BTreeSet<ExtensionKind>> {
    if let Some(declared) = declared_kinds(manifest)? {
        let mut kinds = declared;
        if manifest.browser.is_some() {
            kinds.insert(ExtensionKind::Web);
        }
        return Ok(kinds);
    }

    let kinds: BTreeSet<ExtensionKind> = match (&manifest.main, &manifest.browser) {
        (Some(_), Some(_)) => [ExtensionKind::Workspace, ExtensionKind::Web].into(),
        (Some(_), None) => [ExtensionKind::Workspace].into(),
        (None, Some(_)) => [ExtensionKind::Web].into(),
        (None, None) if has_entries(&manifest.extension_pack)
            || has_entries(&manifest.extension_dependencies) =>
        {
            [ExtensionKind::Workspace, ExtensionKind::Web].into()
        }
        (None, None) => narrow_by_contributions(manifest),
    };

    Ok(kinds)
}

fn declared_kinds(manifest: &Manifest) -> VsixResult<Option<BTreeSet<ExtensionKind>>> {
    let kinds = match &manifest.extension_kind {
        None => return Ok(None),
        Some(ExtensionKindDeclaration::Single(kind)) => {
            let kind: ExtensionKind = kind.parse()?;
            if kind == ExtensionKind::Ui {
                BTreeSet::from([ExtensionKind::Ui, ExtensionKind::Workspace])
            } else {
                BTreeSet::from([kind])
            }
        }
        Some(ExtensionKindDeclaration::Many(kinds)) => kinds
            .iter()
            .map(|kind| kind.parse())
            .collect::<VsixResult<BTreeSet<_>>>()?,
    };

    Ok(if kinds.is_empty() { None } else { Some(kinds) })
}

fn has_entries(list: &Option<Vec<String>>) -> bool {
    list.as_ref().is_some_and(|l| !l.is_empty())
}

fn narrow_by_contributions(manifest: &Manifest) -> BTreeSet<ExtensionKind> {
    let mut kinds: BTreeSet<ExtensionKind> = ExtensionKind::ALL.into();
    for key in manifest.contribution_keys() {
        if let Some(allowed) = contribution_kinds(key) {
            kinds.retain(|kind| allowed.contains(kind));
        }
    }
    kinds
}

/// Comma-joined kinds as written into the vsix manifest
pub fn join(kinds: &BTreeSet<ExtensionKind>) -> String {
    kinds
        .iter()
        .map(ExtensionKind::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
