//! Command implementations

pub mod boot;
pub mod check;
pub mod deps;
pub mod discard;
pub mod list;
pub mod theme;
pub mod toggle;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use modhost_core::{ConfigLoader, ModhostConfig};
use modhost_lifecycle::YamlModuleStore;
use std::sync::Arc;
use tracing::debug;

use crate::output;

/// Flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<Utf8PathBuf>,
    pub app_root: Option<Utf8PathBuf>,
}

/// Load configuration honoring `--config` and `--app-root`
pub(crate) fn load_config(global: &GlobalArgs) -> Result<ModhostConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &global.config {
        loader = loader.with_file(path.clone());
    }
    if let Some(root) = &global.app_root {
        loader = loader.with_app_root(root.clone());
    }
    let config = loader
        .load()
        .context("Failed to load modhost configuration")?;
    debug!("Using registry {}", config.registry_path());
    Ok(config)
}

/// Registry store for the configured registry file
pub(crate) fn open_registry(config: &ModhostConfig) -> Arc<YamlModuleStore> {
    Arc::new(YamlModuleStore::new(config.registry_path()))
}

/// Print a lifecycle error with its code and remediation payload
pub(crate) fn report_error(err: &modhost_core::Error) {
    output::error(&err.display_chain());
    output::kv("code", err.code());
    output::kv("status", &err.status().to_string());
    if let Some(datas) = err.datas() {
        output::kv("datas", &datas.to_string());
    }
}
