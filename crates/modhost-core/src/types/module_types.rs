//! Module descriptor types
//!
//! These mirror the records kept by the module registry. The lifecycle core
//! only ever reads them; installation tooling outside this workspace writes them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Runtime context a package requirement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Server-side packages
    Api,
    /// Front-end theme packages
    Theme,
}

impl Ecosystem {
    /// Every ecosystem, in map order
    pub const ALL: [Ecosystem; 2] = [Ecosystem::Api, Ecosystem::Theme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Api => "api",
            Ecosystem::Theme => "theme",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package requirements: ecosystem -> package name -> version requirement
pub type PackageDependencies = BTreeMap<Ecosystem, BTreeMap<String, String>>;

/// A module as recorded in the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    /// Unique module name (registry primary key)
    pub name: String,

    /// Whether the module is currently activated
    #[serde(default)]
    pub active: bool,

    /// Modules that must be active before this one (declaration order kept)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_dependencies: Option<Vec<String>>,

    /// Package version requirements per ecosystem
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub package_dependencies: PackageDependencies,
}

impl ModuleDescriptor {
    /// Create an inactive module with no dependencies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declared module dependencies, empty when absent
    pub fn dependencies(&self) -> &[String] {
        self.module_dependencies.as_deref().unwrap_or_default()
    }

    /// Whether this module declares `name` as a module dependency
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies().iter().any(|dep| dep == name)
    }
}

/// One of the two boot passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BootPhase {
    /// Phase 1, before the host accepts traffic
    Init,
    /// Phase 2, after server and router wiring exist
    InitAfter,
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootPhase::Init => f.write_str("init"),
            BootPhase::InitAfter => f.write_str("initAfter"),
        }
    }
}
