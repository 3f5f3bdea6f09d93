//! Configuration management for modhost

mod loader;

pub use loader::ConfigLoader;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Resolved modhost configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModhostConfig {
    /// Application root; modules, themes and the registry live below it
    pub app_root: Utf8PathBuf,

    /// Module registry file (relative to `app_root` unless absolute)
    pub registry_file: Utf8PathBuf,

    /// Directory holding one folder per module
    pub modules_dir: String,

    /// Directory holding one folder per theme
    pub themes_dir: String,

    /// Theme whose module list is scaffolded
    pub current_theme: String,

    /// License gate settings
    pub licensing: LicensingConfig,
}

impl ModhostConfig {
    /// Absolute or app-root-relative path of the registry file
    pub fn registry_path(&self) -> Utf8PathBuf {
        self.resolve(&self.registry_file)
    }

    /// `{app_root}/{modules_dir}`
    pub fn modules_path(&self) -> Utf8PathBuf {
        self.app_root.join(&self.modules_dir)
    }

    /// `{app_root}/{themes_dir}`
    pub fn themes_path(&self) -> Utf8PathBuf {
        self.app_root.join(&self.themes_dir)
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.app_root.join(path)
        }
    }
}

/// License gate settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensingConfig {
    pub mode: LicenseMode,

    /// Licensed module names (allowlist mode only)
    #[serde(default)]
    pub modules: Vec<String>,
}

/// How module licenses are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseMode {
    /// Every module is licensed
    #[default]
    Open,
    /// Only modules listed in `licensing.modules` are licensed
    Allowlist,
}

impl FromStr for LicenseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(LicenseMode::Open),
            "allowlist" => Ok(LicenseMode::Allowlist),
            other => Err(Error::invalid_config(format!(
                "Unknown license mode: {}. Valid modes: open, allowlist",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(app_root: &str, registry_file: &str) -> ModhostConfig {
        ModhostConfig {
            app_root: app_root.into(),
            registry_file: registry_file.into(),
            modules_dir: "modules".to_string(),
            themes_dir: "themes".to_string(),
            current_theme: "default".to_string(),
            licensing: LicensingConfig::default(),
        }
    }

    #[test]
    fn test_registry_path_relative_to_app_root() {
        let config = config("/srv/app", "modules.yaml");
        assert_eq!(config.registry_path(), Utf8PathBuf::from("/srv/app/modules.yaml"));
        assert_eq!(config.modules_path(), Utf8PathBuf::from("/srv/app/modules"));
    }

    #[test]
    fn test_registry_path_absolute_kept() {
        let config = config("/srv/app", "/var/lib/modhost/modules.yaml");
        assert_eq!(
            config.registry_path(),
            Utf8PathBuf::from("/var/lib/modhost/modules.yaml")
        );
    }

    #[test]
    fn test_license_mode_parse() {
        assert_eq!("open".parse::<LicenseMode>().unwrap(), LicenseMode::Open);
        assert_eq!(" AllowList ".parse::<LicenseMode>().unwrap(), LicenseMode::Allowlist);
        assert!("strict".parse::<LicenseMode>().is_err());
    }
}
