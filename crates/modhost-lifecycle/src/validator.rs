//! Module dependency validation
//!
//! Gates activation and deactivation against the registry:
//! - before activation, every declared dependency must exist and be active
//! - before deactivation, no other active module may declare a dependency on it
//!
//! A refused transition is returned as an error carrying the full report so
//! callers can tell the user exactly what to (de)activate first.

use modhost_core::types::{InstallReport, ModuleDescriptor, UninstallReport};
use modhost_core::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::registry::{ModuleFilter, ModuleStore};

/// Dependency checks backed by a module registry
#[derive(Clone)]
pub struct DependencyValidator {
    store: Arc<dyn ModuleStore>,
}

impl DependencyValidator {
    pub fn new(store: Arc<dyn ModuleStore>) -> Self {
        Self { store }
    }

    /// Classify each declared dependency of `module` as missing or inactive
    ///
    /// Names are reported in declaration order. A module without a
    /// `moduleDependencies` declaration is not checked at all.
    pub async fn install_report(&self, module: &ModuleDescriptor) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        let Some(dependencies) = &module.module_dependencies else {
            return Ok(report);
        };

        let known = self.store.find(&ModuleFilter::all()).await?;
        for dependency in dependencies {
            match known.iter().find(|m| &m.name == dependency) {
                None => report.missing_dependencies.push(dependency.clone()),
                Some(found) if !found.active => report.need_activation.push(found.name.clone()),
                Some(_) => {}
            }
        }

        Ok(report)
    }

    /// Active modules, other than `module`, that declare a dependency on it
    pub async fn uninstall_report(&self, module: &ModuleDescriptor) -> Result<UninstallReport> {
        let others = self
            .store
            .find(&ModuleFilter::active_except(&module.name))
            .await?;

        let need_deactivation = others
            .into_iter()
            .filter(|other| other.depends_on(&module.name))
            .map(|other| other.name)
            .collect();

        Ok(UninstallReport { need_deactivation })
    }

    /// Fail with `MissingModuleDependencies` unless `module` may be activated
    pub async fn validate_for_install(&self, module: &ModuleDescriptor) -> Result<()> {
        let report = self.install_report(module).await?;
        if !report.is_empty() {
            info!("Refusing to activate {}: {}", module.name, report);
            return Err(Error::MissingModuleDependencies { report });
        }
        debug!("Dependencies of {} are satisfied", module.name);
        Ok(())
    }

    /// Fail with `RequiredModuleDependencies` unless `module` may be deactivated
    pub async fn validate_for_uninstall(&self, module: &ModuleDescriptor) -> Result<()> {
        let report = self.uninstall_report(module).await?;
        if !report.is_empty() {
            info!("Refusing to deactivate {}: {}", module.name, report);
            return Err(Error::RequiredModuleDependencies { report });
        }
        debug!("No active module depends on {}", module.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryModuleStore;

    fn module(name: &str, active: bool, deps: Option<&[&str]>) -> ModuleDescriptor {
        ModuleDescriptor {
            active,
            module_dependencies: deps.map(|d| d.iter().map(|s| s.to_string()).collect()),
            ..ModuleDescriptor::new(name)
        }
    }

    fn validator(modules: Vec<ModuleDescriptor>) -> DependencyValidator {
        DependencyValidator::new(Arc::new(MemoryModuleStore::with_modules(modules)))
    }

    #[tokio::test]
    async fn test_install_report_classifies_in_declared_order() {
        let validator = validator(vec![
            module("pricing", false, None),
            module("stock", true, None),
            module("media", false, None),
        ]);
        let target = module("shop", false, Some(&["media", "ghost", "stock", "pricing", "phantom"]));

        let report = validator.install_report(&target).await.unwrap();

        assert_eq!(report.missing_dependencies, vec!["ghost", "phantom"]);
        assert_eq!(report.need_activation, vec!["media", "pricing"]);
    }

    #[tokio::test]
    async fn test_absent_dependencies_skip_registry() {
        // a failing store would surface as an error if it were queried
        struct BrokenStore;

        #[async_trait::async_trait]
        impl ModuleStore for BrokenStore {
            async fn find(&self, _: &ModuleFilter) -> Result<Vec<ModuleDescriptor>> {
                Err(Error::registry("unreachable"))
            }
        }

        let validator = DependencyValidator::new(Arc::new(BrokenStore));
        assert!(validator
            .validate_for_install(&module("shop", false, None))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_uninstall_ignores_inactive_dependents() {
        let validator = validator(vec![
            module("shop", true, None),
            module("stock", false, Some(&["shop"])),
        ]);

        assert!(validator
            .validate_for_uninstall(&module("shop", true, None))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_uninstall_ignores_self_reference() {
        let validator = validator(vec![module("shop", true, Some(&["shop"]))]);

        let report = validator
            .uninstall_report(&module("shop", true, Some(&["shop"])))
            .await
            .unwrap();
        assert!(report.is_empty());
    }
}
