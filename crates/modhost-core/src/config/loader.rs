//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Config file (explicit path, else `{app_root}/modhost.yaml` when present)
//! 3. Environment variables (MODHOST_* prefix)
//! 4. CLI flags (handled by caller)

use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::debug;

use super::{LicenseMode, LicensingConfig, ModhostConfig};
use crate::error::{Error, Result};

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "modhost-defaults.yaml";
const CONFIG_FILE_NAME: &str = "modhost.yaml";

/// Partial configuration as written in a modhost.yaml file
#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    app_root: Option<Utf8PathBuf>,
    registry_file: Option<Utf8PathBuf>,
    modules_dir: Option<String>,
    themes_dir: Option<String>,
    current_theme: Option<String>,
    licensing: Option<LicensingOverlay>,
}

#[derive(Debug, Default, Deserialize)]
struct LicensingOverlay {
    mode: Option<LicenseMode>,
    modules: Option<Vec<String>>,
}

/// Configuration hierarchy loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Explicit config file; must exist when set
    config_file: Option<Utf8PathBuf>,

    /// App root given on the command line
    app_root: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit config file instead of `{app_root}/modhost.yaml`
    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the app root (highest precedence)
    pub fn with_app_root(mut self, app_root: impl Into<Utf8PathBuf>) -> Self {
        self.app_root = Some(app_root.into());
        self
    }

    /// Load configuration reading overrides from the process environment
    pub fn load(&self) -> Result<ModhostConfig> {
        self.load_with_env(|key| env::var(key).ok())
    }

    /// Load configuration reading overrides through `lookup`
    pub fn load_with_env<F>(&self, lookup: F) -> Result<ModhostConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_embedded_config::<ModhostConfig>(DEFAULTS_FILE)?;

        // The config file is looked up under the most specific app root known so far
        let candidate_root = self
            .app_root
            .clone()
            .or_else(|| lookup("MODHOST_APP_ROOT").map(Utf8PathBuf::from))
            .unwrap_or_else(|| config.app_root.clone());

        match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config_not_found(path.as_str()));
                }
                let overlay = Self::load_yaml_file::<ConfigOverlay>(path)?;
                config = Self::merge(config, overlay);
            }
            None => {
                let implicit = candidate_root.join(CONFIG_FILE_NAME);
                if implicit.exists() {
                    let overlay = Self::load_yaml_file::<ConfigOverlay>(&implicit)?;
                    config = Self::merge(config, overlay);
                } else {
                    debug!("No config file at {}, using defaults", implicit);
                }
            }
        }

        config = Self::apply_env_overrides(config, &lookup)?;

        if let Some(app_root) = &self.app_root {
            config.app_root = app_root.clone();
        }

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge a file overlay onto the base config
    fn merge(mut base: ModhostConfig, overlay: ConfigOverlay) -> ModhostConfig {
        if let Some(app_root) = overlay.app_root {
            base.app_root = app_root;
        }
        if let Some(registry_file) = overlay.registry_file {
            base.registry_file = registry_file;
        }
        if let Some(modules_dir) = overlay.modules_dir {
            base.modules_dir = modules_dir;
        }
        if let Some(themes_dir) = overlay.themes_dir {
            base.themes_dir = themes_dir;
        }
        if let Some(current_theme) = overlay.current_theme {
            base.current_theme = current_theme;
        }
        if let Some(licensing) = overlay.licensing {
            base.licensing = LicensingConfig {
                mode: licensing.mode.unwrap_or(base.licensing.mode),
                modules: licensing.modules.unwrap_or(base.licensing.modules),
            };
        }
        base
    }

    /// Apply environment variable overrides
    fn apply_env_overrides<F>(mut config: ModhostConfig, lookup: &F) -> Result<ModhostConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("MODHOST_APP_ROOT") {
            config.app_root = Utf8PathBuf::from(val);
        }

        if let Some(val) = lookup("MODHOST_REGISTRY") {
            config.registry_file = Utf8PathBuf::from(val);
        }

        if let Some(val) = lookup("MODHOST_THEME") {
            config.current_theme = val;
        }

        if let Some(val) = lookup("MODHOST_LICENSE_MODE") {
            config.licensing.mode = val.parse()?;
        }

        if let Some(val) = lookup("MODHOST_LICENSED_MODULES") {
            config.licensing.modules = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }
}
