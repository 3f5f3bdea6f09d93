//! Module registry access
//!
//! The registry is the persisted list of known modules. The lifecycle core
//! only queries it, through three filters:
//! 1. every module (install check)
//! 2. active modules (boot)
//! 3. active modules other than a given one (uninstall check, dependency merge)
//!
//! Stores return modules in their own order; callers never sort.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use modhost_core::types::ModuleDescriptor;
use modhost_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;

/// Registry query filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleFilter {
    /// Only modules with this `active` flag
    pub active: Option<bool>,

    /// Leave out the module with this name
    pub exclude_name: Option<String>,
}

impl ModuleFilter {
    /// Match every module
    pub fn all() -> Self {
        Self::default()
    }

    /// Match active modules
    pub fn active() -> Self {
        Self {
            active: Some(true),
            exclude_name: None,
        }
    }

    /// Match active modules other than `name`
    pub fn active_except(name: impl Into<String>) -> Self {
        Self {
            active: Some(true),
            exclude_name: Some(name.into()),
        }
    }

    pub fn matches(&self, module: &ModuleDescriptor) -> bool {
        if let Some(active) = self.active {
            if module.active != active {
                return false;
            }
        }
        if let Some(excluded) = &self.exclude_name {
            if &module.name == excluded {
                return false;
            }
        }
        true
    }
}

/// Query contract the lifecycle core needs from the module registry
#[async_trait]
pub trait ModuleStore: Send + Sync {
    /// Modules matching `filter`, in store order
    async fn find(&self, filter: &ModuleFilter) -> Result<Vec<ModuleDescriptor>>;

    /// Look up a single module by name
    async fn get(&self, name: &str) -> Result<Option<ModuleDescriptor>> {
        Ok(self
            .find(&ModuleFilter::all())
            .await?
            .into_iter()
            .find(|module| module.name == name))
    }
}

/// Insertion-ordered in-memory registry
#[derive(Debug, Default)]
pub struct MemoryModuleStore {
    modules: RwLock<Vec<ModuleDescriptor>>,
}

impl MemoryModuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modules(modules: Vec<ModuleDescriptor>) -> Self {
        Self {
            modules: RwLock::new(modules),
        }
    }

    /// Insert a module, replacing (in place) any module with the same name
    pub fn upsert(&self, module: ModuleDescriptor) -> Result<()> {
        let mut modules = self
            .modules
            .write()
            .map_err(|_| Error::registry("module store lock poisoned"))?;
        match modules.iter_mut().find(|m| m.name == module.name) {
            Some(existing) => *existing = module,
            None => modules.push(module),
        }
        Ok(())
    }

    /// Flip the `active` flag of a module
    pub fn set_active(&self, name: &str, active: bool) -> Result<()> {
        let mut modules = self
            .modules
            .write()
            .map_err(|_| Error::registry("module store lock poisoned"))?;
        let module = modules
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| Error::module_not_found(name))?;
        module.active = active;
        Ok(())
    }
}

#[async_trait]
impl ModuleStore for MemoryModuleStore {
    async fn find(&self, filter: &ModuleFilter) -> Result<Vec<ModuleDescriptor>> {
        let modules = self
            .modules
            .read()
            .map_err(|_| Error::registry("module store lock poisoned"))?;
        Ok(modules.iter().filter(|m| filter.matches(m)).cloned().collect())
    }
}

/// On-disk registry file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

/// Registry backed by a YAML file, re-read on every query
#[derive(Debug, Clone)]
pub struct YamlModuleStore {
    path: Utf8PathBuf,
}

impl YamlModuleStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read and parse the registry file
    pub async fn load(&self) -> Result<RegistryFile> {
        debug!("Loading module registry from {}", self.path);
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::registry(format!("cannot read {}: {}", self.path, e)))?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Write the registry file back
    pub async fn save(&self, registry: &RegistryFile) -> Result<()> {
        let content = serde_yaml_ng::to_string(registry)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Flip the `active` flag of a module and persist the change
    pub async fn set_active(&self, name: &str, active: bool) -> Result<()> {
        let mut registry = self.load().await?;
        let module = registry
            .modules
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| Error::module_not_found(name))?;
        module.active = active;
        self.save(&registry).await
    }
}

#[async_trait]
impl ModuleStore for YamlModuleStore {
    async fn find(&self, filter: &ModuleFilter) -> Result<Vec<ModuleDescriptor>> {
        let registry = self.load().await?;
        Ok(registry
            .modules
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect())
    }
}
