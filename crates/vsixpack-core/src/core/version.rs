use crate::core::error::{VsixError, VsixResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version range forms accepted in `engines.vscode` and dependency maps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Any version: "*"
    Any,
    /// Exact version: "1.2.3"
    Exact(Version),
    /// Compatible version: "^1.2.3" (>=1.2.3 <2.0.0)
    Compatible(Version),
    /// Patch version: "~1.2.3" (>=1.2.3 <1.3.0)
    Patch(Version),
    /// Greater than or equal: ">=1.2.3"
    GreaterOrEqual(Version),
    /// Any patch version: "1.2.x"
    AnyPatch(Version),
}

impl VersionConstraint {
    /// Lowest version the constraint admits, `None` for "*"
    pub fn minimum(&self) -> Option<&Version> {
        match self {
            VersionConstraint::Any => None,
            VersionConstraint::Exact(v)
            | VersionConstraint::Compatible(v)
            | VersionConstraint::Patch(v)
            | VersionConstraint::GreaterOrEqual(v)
            | VersionConstraint::AnyPatch(v) => Some(v),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release version (e.g., "insider", "beta.2")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Parse a version string (e.g., "1.2.3", "1.2.3-insider", "1.2.3+build.4").
    ///
    /// Missing minor/patch parts and `x` wildcards read as 0.
    pub fn parse(s: &str) -> VsixResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);

        // Build metadata never takes part in comparisons
        let without_build = s.split('+').next().unwrap_or(s);

        let (version_part, prerelease) = match without_build.split_once('-') {
            Some((v, pre)) if !pre.is_empty() => (v, Some(pre.to_string())),
            _ => (without_build, None),
        };

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() > 3 || parts[0].is_empty() {
            return Err(VsixError::Validation(format!(
                "Invalid version format: {}",
                s
            )));
        }

        let parse_part = |part: Option<&&str>, label: &str| -> VsixResult<u64> {
            match part {
                None => Ok(0),
                Some(p) if p.eq_ignore_ascii_case("x") || *p == "*" => Ok(0),
                Some(p) => p.parse().map_err(|_| {
                    VsixError::Validation(format!("Invalid {} version in '{}'", label, s))
                }),
            }
        };

        Ok(Self {
            major: parse_part(parts.first(), "major")?,
            minor: parse_part(parts.get(1), "minor")?,
            patch: parse_part(parts.get(2), "patch")?,
            prerelease,
        })
    }

    /// Compare only the numeric release triple, ignoring pre-release tags
    pub fn release_triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.release_triple() == other.release_triple() && self.prerelease == other.prerelease
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.release_triple().cmp(&other.release_triple()) {
            std::cmp::Ordering::Equal => match (&self.prerelease, &other.prerelease) {
                (None, None) => std::cmp::Ordering::Equal,
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            },
            other => other,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

/// Parse a version constraint string
pub fn parse_constraint(s: &str) -> VsixResult<VersionConstraint> {
    let s = s.trim();

    if s == "*" || s.is_empty() {
        Ok(VersionConstraint::Any)
    } else if let Some(rest) = s.strip_prefix('^') {
        Ok(VersionConstraint::Compatible(Version::parse(rest)?))
    } else if let Some(rest) = s.strip_prefix('~') {
        Ok(VersionConstraint::Patch(Version::parse(rest)?))
    } else if let Some(rest) = s.strip_prefix(">=") {
        Ok(VersionConstraint::GreaterOrEqual(Version::parse(rest)?))
    } else if let Some(base) = s.strip_suffix(".x") {
        Ok(VersionConstraint::AnyPatch(Version::parse(base)?))
    } else {
        Ok(VersionConstraint::Exact(Version::parse(s)?))
    }
}
