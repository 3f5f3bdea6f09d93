//! Module manager
//!
//! Public entry point for activation checks and dependency merging. The two
//! checks can be replaced at runtime through a [`HookRegistry`] injected at
//! construction.

use modhost_core::types::{
    InstallReport, MergeMode, MergedDependencyMap, ModuleDescriptor, UninstallReport,
};
use modhost_core::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::dependency::merge_package_dependencies;
use crate::hooks::{HookRegistry, CHECK_INSTALL, CHECK_UNINSTALL};
use crate::registry::{ModuleFilter, ModuleStore};
use crate::validator::DependencyValidator;

/// Activation checks and dependency merging over one registry
#[derive(Clone)]
pub struct ModuleManager {
    store: Arc<dyn ModuleStore>,
    validator: DependencyValidator,
    hooks: Arc<HookRegistry>,
}

impl ModuleManager {
    pub fn new(store: Arc<dyn ModuleStore>) -> Self {
        Self {
            validator: DependencyValidator::new(store.clone()),
            store,
            hooks: Arc::new(HookRegistry::new()),
        }
    }

    /// Use `hooks` for overridable operations
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    pub fn store(&self) -> &Arc<dyn ModuleStore> {
        &self.store
    }

    pub fn validator(&self) -> &DependencyValidator {
        &self.validator
    }

    /// Refuse activation of `module` unless its dependencies are present and active
    pub async fn check_install(&self, module: &ModuleDescriptor) -> Result<()> {
        let validator = self.validator.clone();
        let target = module.clone();
        self.dispatch(CHECK_INSTALL, module, || async move {
            validator.validate_for_install(&target).await?;
            Ok::<_, anyhow::Error>(Value::Null)
        })
        .await
    }

    /// Refuse deactivation of `module` while active modules depend on it
    pub async fn check_uninstall(&self, module: &ModuleDescriptor) -> Result<()> {
        let validator = self.validator.clone();
        let target = module.clone();
        self.dispatch(CHECK_UNINSTALL, module, || async move {
            validator.validate_for_uninstall(&target).await?;
            Ok::<_, anyhow::Error>(Value::Null)
        })
        .await
    }

    /// [`check_install`](Self::check_install) for a registry entry
    pub async fn check_install_by_name(&self, name: &str) -> Result<()> {
        let module = self.require(name).await?;
        self.check_install(&module).await
    }

    /// [`check_uninstall`](Self::check_uninstall) for a registry entry
    pub async fn check_uninstall_by_name(&self, name: &str) -> Result<()> {
        let module = self.require(name).await?;
        self.check_uninstall(&module).await
    }

    /// Install-time report without raising, for display
    pub async fn install_report(&self, name: &str) -> Result<InstallReport> {
        let module = self.require(name).await?;
        self.validator.install_report(&module).await
    }

    /// Uninstall-time report without raising, for display
    pub async fn uninstall_report(&self, name: &str) -> Result<UninstallReport> {
        let module = self.require(name).await?;
        self.validator.uninstall_report(&module).await
    }

    /// Merge the package requirements of `module` with those of the other active modules
    pub async fn compare_dependencies(
        &self,
        module: &ModuleDescriptor,
        mode: MergeMode,
    ) -> Result<MergedDependencyMap> {
        let others = self
            .store
            .find(&ModuleFilter::active_except(&module.name))
            .await?;
        Ok(merge_package_dependencies(module, &others, mode))
    }

    /// [`compare_dependencies`](Self::compare_dependencies) for a registry entry
    pub async fn merged_dependencies(
        &self,
        name: &str,
        mode: MergeMode,
    ) -> Result<MergedDependencyMap> {
        let module = self.require(name).await?;
        self.compare_dependencies(&module, mode).await
    }

    async fn require(&self, name: &str) -> Result<ModuleDescriptor> {
        self.store
            .get(name)
            .await?
            .ok_or_else(|| Error::module_not_found(name))
    }

    async fn dispatch<F, Fut>(
        &self,
        hook: &str,
        module: &ModuleDescriptor,
        default: F,
    ) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = anyhow::Result<Value>>,
    {
        debug!("{} for {}", hook, module.name);
        let params = serde_json::to_value(module)?;
        self.hooks
            .invoke_with_override(hook, params, default)
            .await
            .map(|_| ())
            .map_err(|e| match e.downcast::<Error>() {
                Ok(error) => error,
                Err(other) => Error::hook(hook, other),
            })
    }
}
