//! Persisted activation changes
//!
//! Flip a module's `active` flag in a YAML registry after the matching
//! dependency check passes. A refused change does not write the file.

use modhost_core::Result;
use std::sync::Arc;
use tracing::info;

use crate::manager::ModuleManager;
use crate::registry::YamlModuleStore;

/// Activate `name` once its dependencies are present and active
pub async fn activate_module(store: Arc<YamlModuleStore>, name: &str) -> Result<()> {
    ModuleManager::new(store.clone())
        .check_install_by_name(name)
        .await?;
    store.set_active(name, true).await?;
    info!("Activated {} in {}", name, store.path());
    Ok(())
}

/// Deactivate `name` once no other active module depends on it
pub async fn deactivate_module(store: Arc<YamlModuleStore>, name: &str) -> Result<()> {
    ModuleManager::new(store.clone())
        .check_uninstall_by_name(name)
        .await?;
    store.set_active(name, false).await?;
    info!("Deactivated {} in {}", name, store.path());
    Ok(())
}
