//! Module lifecycle management for modhost
//!
//! This crate handles:
//! - Module registry queries (in-memory and YAML-backed stores)
//! - Package dependency merging against active modules
//! - Dependency validation before activation and deactivation
//! - Persisted activation changes in a YAML registry
//! - License gating of module entry points
//! - Two-phase boot (`init`, then `initAfter`) over the active modules
//! - Hook overrides for the public lifecycle operations
//! - Theme module list scaffolding

pub mod activation;
pub mod dependency;
pub mod discovery;
pub mod hooks;
pub mod license;
pub mod loader;
pub mod manager;
pub mod plugin;
pub mod registry;
pub mod scaffold;
pub mod validator;

pub use activation::{activate_module, deactivate_module};
pub use dependency::merge_package_dependencies;
pub use discovery::{
    discover_script_plugins, AuthRealm, MountPoint, ScriptEntry, ScriptHost, ServerInfo,
};
pub use hooks::HookRegistry;
pub use license::{license_gate_from_config, AllowListLicenseGate, LicenseGate, OpenLicenseGate};
pub use loader::{
    BootSequence, LoadState, LoadedModule, ModuleFailure, PhaseOneOutcome, PhaseTwoReport,
    TwoPhaseLoader,
};
pub use manager::ModuleManager;
pub use plugin::{
    BootHost, InitAfterContext, InitContext, ModuleInit, ModuleInitAfter, ModulePlugin,
    PluginTable,
};
pub use registry::{MemoryModuleStore, ModuleFilter, ModuleStore, YamlModuleStore};
pub use scaffold::{discard_module_archive, ensure_module_list, read_module_list};
pub use validator::DependencyValidator;
