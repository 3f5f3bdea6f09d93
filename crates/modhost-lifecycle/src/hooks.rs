//! Hook overrides for lifecycle operations
//!
//! A host can replace a named operation with its own implementation by
//! registering an override before handing the registry to the
//! [`ModuleManager`](crate::ModuleManager). When no override is registered the
//! built-in implementation runs. Both paths are awaited the same way and their
//! errors propagate unchanged.

use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Operation name for the activation dependency check
pub const CHECK_INSTALL: &str = "check_install";

/// Operation name for the deactivation dependency check
pub const CHECK_UNINSTALL: &str = "check_uninstall";

/// Boxed override future
pub type HookFuture = BoxFuture<'static, anyhow::Result<Value>>;

/// Override callable: receives the operation parameters as JSON
pub type HookFn = Arc<dyn Fn(Value) -> HookFuture + Send + Sync>;

/// Named operation overrides
#[derive(Clone, Default)]
pub struct HookRegistry {
    overrides: HashMap<String, HookFn>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` as the implementation of `name`, replacing any previous one
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, hook: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        let name = name.into();
        debug!("Registering override for {}", name);
        let boxed: HookFn = Arc::new(move |params| -> HookFuture { Box::pin(hook(params)) });
        self.overrides.insert(name, boxed);
    }

    /// Remove the override for `name`; returns whether one was registered
    pub fn unregister(&mut self, name: &str) -> bool {
        self.overrides.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }

    /// Run the override registered for `name`, or `default` when there is none
    pub async fn invoke_with_override<F, Fut>(
        &self,
        name: &str,
        params: Value,
        default: F,
    ) -> anyhow::Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        match self.overrides.get(name) {
            Some(hook) => {
                debug!("Dispatching {} to override", name);
                hook(params).await
            }
            None => default().await,
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.overrides.keys().collect();
        names.sort();
        f.debug_struct("HookRegistry")
            .field("overrides", &names)
            .finish()
    }
}
