//! Module entry points
//!
//! Each module may ship two entry points: `init`, run in boot phase 1 before
//! the host accepts traffic, and `initAfter`, run in phase 2 once the server
//! and router exist. Entry points are registered explicitly in a
//! [`PluginTable`]; a module with no table entry simply has neither.
//!
//! The host handles an entry point receives are opaque to this crate and are
//! described by a [`BootHost`] implementation.

use async_trait::async_trait;
use camino::Utf8Path;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Host handle types passed to module entry points
pub trait BootHost: Send + Sync + 'static {
    /// Router or mount point modules attach routes to
    type Mount: Send + Sync;
    /// Running server
    type Server: Send + Sync;
    /// Authentication middleware
    type Auth: Send + Sync;
    /// Environment configuration
    type Env: Send + Sync;
}

/// Arguments of a phase-1 entry point
pub struct InitContext<'a, H: BootHost> {
    pub module: &'a str,
    pub mount: &'a H::Mount,
    pub app_root: &'a Utf8Path,
    pub env: &'a H::Env,
}

/// Arguments of a phase-2 entry point
pub struct InitAfterContext<'a, H: BootHost> {
    pub module: &'a str,
    pub server: &'a H::Server,
    pub api_router: &'a H::Mount,
    pub auth: &'a H::Auth,
}

/// Phase-1 entry point
#[async_trait]
pub trait ModuleInit<H: BootHost>: Send + Sync {
    async fn init(&self, ctx: InitContext<'_, H>) -> anyhow::Result<()>;
}

/// Phase-2 entry point; resolving the future is the single completion signal
#[async_trait]
pub trait ModuleInitAfter<H: BootHost>: Send + Sync {
    async fn init_after(&self, ctx: InitAfterContext<'_, H>) -> anyhow::Result<()>;
}

/// Entry points shipped by one module
pub struct ModulePlugin<H: BootHost> {
    pub init: Option<Arc<dyn ModuleInit<H>>>,
    pub init_after: Option<Arc<dyn ModuleInitAfter<H>>>,
}

impl<H: BootHost> ModulePlugin<H> {
    pub fn new() -> Self {
        Self {
            init: None,
            init_after: None,
        }
    }

    pub fn with_init(mut self, entry: impl ModuleInit<H> + 'static) -> Self {
        self.init = Some(Arc::new(entry));
        self
    }

    pub fn with_init_after(mut self, entry: impl ModuleInitAfter<H> + 'static) -> Self {
        self.init_after = Some(Arc::new(entry));
        self
    }
}

impl<H: BootHost> Default for ModulePlugin<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: BootHost> Clone for ModulePlugin<H> {
    fn clone(&self) -> Self {
        Self {
            init: self.init.clone(),
            init_after: self.init_after.clone(),
        }
    }
}

impl<H: BootHost> fmt::Debug for ModulePlugin<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModulePlugin")
            .field("init", &self.init.is_some())
            .field("init_after", &self.init_after.is_some())
            .finish()
    }
}

/// Module name -> entry points
pub struct PluginTable<H: BootHost> {
    plugins: HashMap<String, ModulePlugin<H>>,
}

impl<H: BootHost> PluginTable<H> {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register the entry points of `module`, replacing any previous registration
    pub fn register(&mut self, module: impl Into<String>, plugin: ModulePlugin<H>) {
        self.plugins.insert(module.into(), plugin);
    }

    pub fn get(&self, module: &str) -> Option<&ModulePlugin<H>> {
        self.plugins.get(module)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.plugins.contains_key(module)
    }

    /// Phase-1 entry point of `module`, if any
    pub fn init_entry(&self, module: &str) -> Option<Arc<dyn ModuleInit<H>>> {
        self.plugins.get(module)?.init.clone()
    }

    /// Phase-2 entry point of `module`, if any
    pub fn init_after_entry(&self, module: &str) -> Option<Arc<dyn ModuleInitAfter<H>>> {
        self.plugins.get(module)?.init_after.clone()
    }

    /// Registered module names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.plugins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl<H: BootHost> Default for PluginTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: BootHost> fmt::Debug for PluginTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.names().into_iter().map(|n| (n, &self.plugins[n])))
            .finish()
    }
}
