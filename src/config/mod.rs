use crate::core::path::{config_file, ensure_dir};
use crate::core::{VsixError, VsixResult};
use crate::di::ConfigProvider;
use crate::package::packager::NO_PACKAGE_MANAGER;
use crate::resolver::PackageManager;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tool-specific ignore file, layered after the general one
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// General-purpose ignore file read before `ignore_file`
    #[serde(default = "default_general_ignore_file")]
    pub general_ignore_file: String,

    /// Whether production dependencies are bundled into the package
    #[serde(default = "default_true")]
    pub dependencies: bool,

    /// Force a package manager instead of detecting one ("npm", "yarn", "pnpm")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,

    /// Content type used for file extensions missing from the built-in table.
    /// When unset, an unknown extension fails packaging.
    #[serde(default = "default_content_type_fallback")]
    pub content_type_fallback: Option<String>,

    /// Whether the `vscode:prepublish` script runs before packaging
    #[serde(default = "default_true")]
    pub run_prepublish: bool,
}

fn default_ignore_file() -> String {
    ".vscodeignore".to_string()
}

fn default_general_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_content_type_fallback() -> Option<String> {
    Some("application/octet-stream".to_string())
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            general_ignore_file: default_general_ignore_file(),
            dependencies: true,
            package_manager: None,
            content_type_fallback: default_content_type_fallback(),
            run_prepublish: true,
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory.
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\vsixpack\config.yaml
    /// - Linux: ~/.config/vsixpack/config.yaml
    /// - macOS: ~/Library/Application Support/vsixpack/config.yaml
    pub fn load() -> VsixResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from an explicit path, defaulting when it does not exist
    pub fn load_from(config_path: &Path) -> VsixResult<Self> {
        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| VsixError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Update one setting by its YAML key.
    ///
    /// `null` clears the optional settings. Unknown keys and values that do
    /// not fit the setting are `Config` errors.
    pub fn set(&mut self, key: &str, value: &str) -> VsixResult<()> {
        match key {
            "ignore_file" => self.ignore_file = non_empty(key, value)?,
            "general_ignore_file" => self.general_ignore_file = non_empty(key, value)?,
            "dependencies" => self.dependencies = parse_bool(key, value)?,
            "run_prepublish" => self.run_prepublish = parse_bool(key, value)?,
            "package_manager" => {
                self.package_manager = match value {
                    "null" => None,
                    NO_PACKAGE_MANAGER => Some(value.to_string()),
                    name => Some(name.parse::<PackageManager>()?.to_string()),
                }
            }
            "content_type_fallback" => {
                self.content_type_fallback = match value {
                    "null" => None,
                    mime => Some(non_empty(key, mime)?),
                }
            }
            other => {
                return Err(VsixError::Config(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }

    /// Save config to the platform-specific config directory
    pub fn save(&self) -> VsixResult<()> {
        self.save_to(&config_file()?)
    }

    pub fn save_to(&self, config_path: &Path) -> VsixResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| VsixError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| VsixError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, content)?;
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> VsixResult<String> {
    if value.trim().is_empty() {
        return Err(VsixError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn parse_bool(key: &str, value: &str) -> VsixResult<bool> {
    value.parse().map_err(|_| {
        VsixError::Config(format!("{} expects true or false, got '{}'", key, value))
    })
}

impl ConfigProvider for Config {
    fn ignore_file(&self) -> &str {
        &self.ignore_file
    }

    fn general_ignore_file(&self) -> &str {
        &self.general_ignore_file
    }

    fn bundle_dependencies(&self) -> bool {
        self.dependencies
    }

    fn package_manager(&self) -> Option<&str> {
        self.package_manager.as_deref()
    }

    fn content_type_fallback(&self) -> Option<&str> {
        self.content_type_fallback.as_deref()
    }

    fn run_prepublish(&self) -> bool {
        self.run_prepublish
    }
}
