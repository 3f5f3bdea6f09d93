//! License gate
//!
//! Decides whether a module may run its entry points. The check is opaque to
//! the loader: it may be slow or do I/O, is never retried, and a `false`
//! answer stops the module for the current phase.

use async_trait::async_trait;
use modhost_core::{LicenseMode, LicensingConfig};
use std::collections::HashSet;
use std::sync::Arc;

/// Per-module license check
#[async_trait]
pub trait LicenseGate: Send + Sync {
    async fn is_licensed(&self, module: &str) -> bool;
}

/// Licenses every module
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenLicenseGate;

#[async_trait]
impl LicenseGate for OpenLicenseGate {
    async fn is_licensed(&self, _module: &str) -> bool {
        true
    }
}

/// Licenses only the listed modules
#[derive(Debug, Clone, Default)]
pub struct AllowListLicenseGate {
    modules: HashSet<String>,
}

impl AllowListLicenseGate {
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl LicenseGate for AllowListLicenseGate {
    async fn is_licensed(&self, module: &str) -> bool {
        self.modules.contains(module)
    }
}

/// Build the gate selected by `licensing.mode`
pub fn license_gate_from_config(config: &LicensingConfig) -> Arc<dyn LicenseGate> {
    match config.mode {
        LicenseMode::Open => Arc::new(OpenLicenseGate),
        LicenseMode::Allowlist => Arc::new(AllowListLicenseGate::new(config.modules.clone())),
    }
}
