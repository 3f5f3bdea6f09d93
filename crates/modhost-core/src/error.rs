//! Error types for modhost-core

use serde_json::Value;
use thiserror::Error;

use crate::types::{BootPhase, InstallReport, UninstallReport};

/// Result type alias using modhost-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for modhost
#[derive(Error, Debug)]
pub enum Error {
    /// Activation refused: dependencies missing or inactive
    #[error("Module dependencies are not satisfied: {report}")]
    MissingModuleDependencies { report: InstallReport },

    /// Deactivation refused: active modules still depend on the module
    #[error("Module is still required by active modules: {report}")]
    RequiredModuleDependencies { report: UninstallReport },

    /// License gate rejected the module
    #[error("License check failed for module {module} ({phase})")]
    LicenseCheckFailed { module: String, phase: BootPhase },

    /// A module's own entry point failed
    #[error("Module {module} failed in {phase}")]
    EntryPoint {
        module: String,
        phase: BootPhase,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No registry entry with this name
    #[error("Unknown module: {name}")]
    ModuleNotFound { name: String },

    /// Registry query failed
    #[error("Module registry error: {message}")]
    Registry { message: String },

    /// A hook override failed
    #[error("Hook {hook} failed")]
    Hook {
        hook: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an entry point failure error
    pub fn entry_point(
        module: impl Into<String>,
        phase: BootPhase,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::EntryPoint {
            module: module.into(),
            phase,
            source: source.into(),
        }
    }

    /// Create a license failure error
    pub fn license_check_failed(module: impl Into<String>, phase: BootPhase) -> Self {
        Self::LicenseCheckFailed {
            module: module.into(),
            phase,
        }
    }

    /// Create a module not found error
    pub fn module_not_found(name: impl Into<String>) -> Self {
        Self::ModuleNotFound { name: name.into() }
    }

    /// Create a registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a hook failure error
    pub fn hook(
        hook: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Hook {
            hook: hook.into(),
            source: source.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// HTTP-style status for callers that render errors to a client
    pub fn status(&self) -> u16 {
        match self {
            Error::MissingModuleDependencies { .. }
            | Error::RequiredModuleDependencies { .. }
            | Error::LicenseCheckFailed { .. } => 403,
            Error::ModuleNotFound { .. } | Error::ConfigNotFound { .. } => 404,
            Error::InvalidConfig { .. } | Error::YamlParse(_) | Error::JsonParse(_) => 400,
            Error::EntryPoint { .. } | Error::Registry { .. } | Error::Hook { .. } | Error::Io(_) => {
                500
            }
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingModuleDependencies { .. } => "MissingModuleDependencies",
            Error::RequiredModuleDependencies { .. } => "RequiredModuleDependencies",
            Error::LicenseCheckFailed { .. } => "LicenseCheckFailed",
            Error::EntryPoint { .. } => "EntryPointFailure",
            Error::ModuleNotFound { .. } => "ModuleNotFound",
            Error::Registry { .. } => "RegistryError",
            Error::Hook { .. } => "HookFailure",
            Error::ConfigNotFound { .. } => "ConfigNotFound",
            Error::InvalidConfig { .. } => "InvalidConfig",
            Error::YamlParse(_) => "YamlParse",
            Error::JsonParse(_) => "JsonParse",
            Error::Io(_) => "Io",
        }
    }

    /// Message followed by every underlying cause, joined with `": "`
    pub fn display_chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Structured remediation payload, for the dependency refusals only
    pub fn datas(&self) -> Option<Value> {
        match self {
            Error::MissingModuleDependencies { report } => serde_json::to_value(report).ok(),
            Error::RequiredModuleDependencies { report } => serde_json::to_value(report).ok(),
            _ => None,
        }
    }
}
