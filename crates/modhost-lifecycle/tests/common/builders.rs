//! Module builders for creating registry fixtures

#![allow(dead_code)]

use modhost_core::types::{Ecosystem, ModuleDescriptor};
use modhost_lifecycle::MemoryModuleStore;
use std::sync::Arc;

/// Builder for creating ModuleDescriptor test fixtures
pub struct ModuleBuilder {
    module: ModuleDescriptor,
}

impl ModuleBuilder {
    /// Inactive module with no dependencies
    pub fn new(name: &str) -> Self {
        Self {
            module: ModuleDescriptor::new(name),
        }
    }

    /// Active module with no dependencies
    pub fn active(name: &str) -> Self {
        Self::new(name).with_active(true)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.module.active = active;
        self
    }

    /// Declare module dependencies (an empty slice still counts as a declaration)
    pub fn depends_on(mut self, deps: &[&str]) -> Self {
        self.module.module_dependencies = Some(deps.iter().map(|d| d.to_string()).collect());
        self
    }

    pub fn api_package(self, package: &str, version: &str) -> Self {
        self.package(Ecosystem::Api, package, version)
    }

    pub fn theme_package(self, package: &str, version: &str) -> Self {
        self.package(Ecosystem::Theme, package, version)
    }

    fn package(mut self, ecosystem: Ecosystem, package: &str, version: &str) -> Self {
        self.module
            .package_dependencies
            .entry(ecosystem)
            .or_default()
            .insert(package.to_string(), version.to_string());
        self
    }

    pub fn build(self) -> ModuleDescriptor {
        self.module
    }
}

/// In-memory registry holding `modules` in the given order
pub fn memory_store(modules: Vec<ModuleDescriptor>) -> Arc<MemoryModuleStore> {
    Arc::new(MemoryModuleStore::with_modules(modules))
}
