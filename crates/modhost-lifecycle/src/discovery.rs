//! Script entry points discovered on disk
//!
//! A module directory `{modules_dir}/{name}/` may contain `init.sh` and
//! `init_after.sh`. Each present script becomes the matching entry point of
//! that module, run with `bash` from the module directory. Host handles are
//! passed to the script as `MODHOST_*` environment variables.

use anyhow::{bail, Context};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use modhost_core::Result;
use std::collections::BTreeMap;
use tokio::process::Command;
use tracing::{debug, info};

use crate::plugin::{
    BootHost, InitAfterContext, InitContext, ModuleInit, ModuleInitAfter, ModulePlugin,
    PluginTable,
};

/// Phase-1 script name inside a module directory
pub const INIT_SCRIPT: &str = "init.sh";

/// Phase-2 script name inside a module directory
pub const INIT_AFTER_SCRIPT: &str = "init_after.sh";

/// Mount point modules attach to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub base_path: String,
}

/// Address of the running server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub address: String,
}

/// Authentication realm handed to phase-2 entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRealm {
    pub name: String,
}

/// Host whose handles are plain descriptions, for shell entry points
#[derive(Debug, Clone, Copy)]
pub struct ScriptHost;

impl BootHost for ScriptHost {
    type Mount = MountPoint;
    type Server = ServerInfo;
    type Auth = AuthRealm;
    type Env = BTreeMap<String, String>;
}

/// A shell script used as an entry point
#[derive(Debug, Clone)]
pub struct ScriptEntry {
    script: Utf8PathBuf,
    workdir: Utf8PathBuf,
}

impl ScriptEntry {
    pub fn new(script: impl Into<Utf8PathBuf>, workdir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            script: script.into(),
            workdir: workdir.into(),
        }
    }

    pub fn script(&self) -> &Utf8Path {
        &self.script
    }

    async fn run(&self, module: &str, vars: BTreeMap<String, String>) -> anyhow::Result<()> {
        debug!("Running {} for {}", self.script, module);

        let output = Command::new("bash")
            .arg(self.script.as_str())
            .current_dir(&self.workdir)
            .env("MODHOST_MODULE", module)
            .envs(vars)
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", self.script))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} exited with {}: {}",
                self.script,
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl ModuleInit<ScriptHost> for ScriptEntry {
    async fn init(&self, ctx: InitContext<'_, ScriptHost>) -> anyhow::Result<()> {
        let mut vars = ctx.env.clone();
        vars.insert("MODHOST_APP_ROOT".into(), ctx.app_root.to_string());
        vars.insert("MODHOST_MOUNT_PATH".into(), ctx.mount.base_path.clone());
        self.run(ctx.module, vars).await
    }
}

#[async_trait]
impl ModuleInitAfter<ScriptHost> for ScriptEntry {
    async fn init_after(&self, ctx: InitAfterContext<'_, ScriptHost>) -> anyhow::Result<()> {
        let vars = BTreeMap::from([
            ("MODHOST_SERVER_ADDRESS".to_string(), ctx.server.address.clone()),
            ("MODHOST_API_MOUNT_PATH".to_string(), ctx.api_router.base_path.clone()),
            ("MODHOST_AUTH_REALM".to_string(), ctx.auth.name.clone()),
        ]);
        self.run(ctx.module, vars).await
    }
}

/// Build a plugin table from the module directories under `modules_path`
///
/// A missing `modules_path` yields an empty table. Directories without
/// either script are skipped.
pub async fn discover_script_plugins(modules_path: &Utf8Path) -> Result<PluginTable<ScriptHost>> {
    let mut table = PluginTable::new();
    if !tokio::fs::try_exists(modules_path).await.unwrap_or(false) {
        debug!("Modules directory {} not found", modules_path);
        return Ok(table);
    }

    let mut entries = tokio::fs::read_dir(modules_path).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let Ok(dir) = Utf8PathBuf::from_path_buf(entry.path()) else {
            debug!("Skipping non UTF-8 module directory {:?}", entry.path());
            continue;
        };
        let Some(name) = dir.file_name().map(str::to_string) else {
            continue;
        };

        let mut plugin = ModulePlugin::new();
        let init = dir.join(INIT_SCRIPT);
        if is_file(&init).await {
            plugin = plugin.with_init(ScriptEntry::new(init, dir.clone()));
        }
        let init_after = dir.join(INIT_AFTER_SCRIPT);
        if is_file(&init_after).await {
            plugin = plugin.with_init_after(ScriptEntry::new(init_after, dir.clone()));
        }

        if plugin.init.is_some() || plugin.init_after.is_some() {
            debug!("Discovered entry points for {}", name);
            table.register(name, plugin);
        }
    }

    info!("Discovered {} module(s) with entry points", table.len());
    Ok(table)
}

async fn is_file(path: &Utf8Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
