use crate::core::version::{parse_constraint, Version};
use crate::core::{VsixError, VsixResult};
use crate::package::Manifest;

const TYPES_PACKAGE: &str = "@types/vscode";

/// Validates the package.json fields packaging depends on
pub struct ManifestValidator;

impl ManifestValidator {
    /// Run every check, stopping at the first failure
    pub fn validate(manifest: &Manifest) -> VsixResult<()> {
        Self::validate_name(&manifest.name)?;
        Self::validate_version(&manifest.version)?;
        Self::validate_publisher(&manifest.publisher)?;

        let engine = manifest.vscode_engine().ok_or_else(|| {
            VsixError::Validation("Manifest missing field: engines.vscode".to_string())
        })?;
        Self::validate_engine(engine)?;

        if let Some(types) = manifest.dev_dependencies.get(TYPES_PACKAGE) {
            Self::validate_types_compat(engine, types)?;
        }

        if let Some(icon) = &manifest.icon {
            Self::validate_icon(icon)?;
        }

        Ok(())
    }

    fn validate_name(name: &str) -> VsixResult<()> {
        if name.is_empty() {
            return Err(VsixError::Validation(
                "Manifest missing field: name".to_string(),
            ));
        }

        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(VsixError::Validation(format!(
                "Extension name '{}' must be lowercase",
                name
            )));
        }

        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));
        if !valid_chars || name.starts_with(['.', '_', '-']) {
            return Err(VsixError::Validation(format!(
                "Invalid extension name '{}'. Use lowercase letters, digits, '-', '.' or '_' and start with a letter or digit",
                name
            )));
        }

        Ok(())
    }

    fn validate_version(version: &str) -> VsixResult<()> {
        if version.is_empty() {
            return Err(VsixError::Validation(
                "Manifest missing field: version".to_string(),
            ));
        }

        let parts = version
            .split(['-', '+'])
            .next()
            .unwrap_or(version)
            .split('.')
            .count();
        if parts != 3 {
            return Err(VsixError::Validation(format!(
                "Invalid extension version '{}'. Expected major.minor.patch",
                version
            )));
        }

        Version::parse(version).map(|_| ()).map_err(|_| {
            VsixError::Validation(format!("Invalid extension version '{}'", version))
        })
    }

    fn validate_publisher(publisher: &str) -> VsixResult<()> {
        if publisher.is_empty() {
            return Err(VsixError::Validation(
                "Manifest missing field: publisher".to_string(),
            ));
        }

        let mut chars = publisher.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
        if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(VsixError::Validation(format!(
                "Invalid publisher name '{}'. Use letters, digits and '-' only",
                publisher
            )));
        }

        Ok(())
    }

    fn validate_engine(engine: &str) -> VsixResult<()> {
        parse_constraint(engine).map(|_| ()).map_err(|e| {
            VsixError::Validation(format!(
                "Invalid engines.vscode range '{}': {}",
                engine, e
            ))
        })
    }

    /// `@types/vscode` must not describe a newer API than the lowest
    /// engine version the extension claims to support
    pub fn validate_types_compat(engine: &str, types: &str) -> VsixResult<()> {
        let Ok(engine_constraint) = parse_constraint(engine) else {
            return Ok(());
        };
        let Some(engine_min) = engine_constraint.minimum() else {
            return Ok(());
        };

        let types_version = match parse_constraint(types) {
            Ok(constraint) => match constraint.minimum() {
                Some(v) => v.clone(),
                None => return Ok(()),
            },
            Err(_) => {
                tracing::debug!("Skipping {} check for unparseable '{}'", TYPES_PACKAGE, types);
                return Ok(());
            }
        };

        if types_version.release_triple() > engine_min.release_triple() {
            return Err(VsixError::Validation(format!(
                "{} {} greater than engines.vscode {}",
                TYPES_PACKAGE, types, engine
            )));
        }

        Ok(())
    }

    fn validate_icon(icon: &str) -> VsixResult<()> {
        if icon.to_ascii_lowercase().ends_with(".svg") {
            return Err(VsixError::Validation(format!(
                "SVGs can't be used as icons: {}",
                icon
            )));
        }
        Ok(())
    }
}
