//! Two-phase module boot
//!
//! Phase 1 (`init`) walks the active modules in registry order and stops at
//! the first module whose license check or entry point fails: later modules
//! may rely on routes and schemas registered by earlier ones, so a partial
//! phase 1 is not continued.
//!
//! Phase 2 (`initAfter`) walks the modules that finished phase 1, one at a
//! time and in the same order. Modules a phase-1 abort never reached are
//! not booted. A failure there is
//! logged and only skips that module.
//!
//! The per-boot records produced by phase 1 are handed to phase 2 as a
//! [`BootSequence`] value and consumed by it.

use camino::{Utf8Path, Utf8PathBuf};
use modhost_core::types::BootPhase;
use modhost_core::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::license::LicenseGate;
use crate::plugin::{BootHost, InitAfterContext, InitContext, PluginTable};
use crate::registry::{ModuleFilter, ModuleStore};

/// Where a module stands in the current boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Not reached yet (or never reached after a phase-1 abort)
    Pending,
    /// License refused in phase 1
    Rejected,
    /// Phase-1 entry point failed
    InitFailed,
    /// Phase 1 done (or no phase-1 entry point)
    InitLoaded,
    /// Phase 2 done (or no phase-2 entry point)
    InitAfterLoaded,
    /// License refused or entry point failed in phase 2
    InitAfterFailed,
}

/// Per-module record for one boot sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedModule {
    pub name: String,

    /// False once phase 1 failed for this module; excludes it from phase 2
    pub init: bool,

    /// True once the license gate accepted the module; never rechecked after
    pub valid: bool,

    pub state: LoadState,
}

impl LoadedModule {
    fn new(name: String) -> Self {
        Self {
            name,
            init: true,
            valid: false,
            state: LoadState::Pending,
        }
    }
}

/// Records created by phase 1 and consumed by phase 2
#[derive(Debug, Default, Serialize)]
pub struct BootSequence {
    records: Vec<LoadedModule>,
}

impl BootSequence {
    pub fn records(&self) -> &[LoadedModule] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&LoadedModule> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A module that failed during boot
#[derive(Debug)]
pub struct ModuleFailure {
    pub module: String,
    pub error: Error,
}

/// Result of phase 1
#[derive(Debug)]
pub struct PhaseOneOutcome {
    pub sequence: BootSequence,

    /// The failure that aborted phase 1, if any
    pub failure: Option<ModuleFailure>,
}

impl PhaseOneOutcome {
    /// True when every module was processed without failure
    pub fn completed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Result of phase 2
#[derive(Debug, Default)]
pub struct PhaseTwoReport {
    /// Final records of the modules that entered phase 2
    pub modules: Vec<LoadedModule>,

    /// Modules skipped because of a phase-2 failure, in boot order
    pub failures: Vec<ModuleFailure>,
}

impl PhaseTwoReport {
    /// Names of the modules that finished phase 2
    pub fn loaded(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|m| m.state == LoadState::InitAfterLoaded)
            .map(|m| m.name.as_str())
            .collect()
    }
}

/// Boots the active modules of a registry in two ordered passes
pub struct TwoPhaseLoader<H: BootHost> {
    store: Arc<dyn ModuleStore>,
    plugins: PluginTable<H>,
    license: Arc<dyn LicenseGate>,
    app_root: Utf8PathBuf,
}

impl<H: BootHost> TwoPhaseLoader<H> {
    pub fn new(
        store: Arc<dyn ModuleStore>,
        plugins: PluginTable<H>,
        license: Arc<dyn LicenseGate>,
        app_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            store,
            plugins,
            license,
            app_root: app_root.into(),
        }
    }

    pub fn app_root(&self) -> &Utf8Path {
        &self.app_root
    }

    pub fn plugins(&self) -> &PluginTable<H> {
        &self.plugins
    }

    /// Run every active module's phase-1 entry point, in registry order
    ///
    /// Registry failures are returned as errors. Module failures abort the
    /// pass and are reported through [`PhaseOneOutcome::failure`]; modules
    /// after the failing one stay [`LoadState::Pending`].
    pub async fn run_phase_one(&self, mount: &H::Mount, env: &H::Env) -> Result<PhaseOneOutcome> {
        let active = self.store.find(&ModuleFilter::active()).await?;
        let mut records: Vec<LoadedModule> = active
            .into_iter()
            .map(|module| LoadedModule::new(module.name))
            .collect();

        if records.is_empty() {
            info!("No modules to load");
            return Ok(PhaseOneOutcome {
                sequence: BootSequence::default(),
                failure: None,
            });
        }

        info!("Start init loading modules");
        debug!(
            "Required modules: {}",
            records
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut failure = None;
        for record in records.iter_mut() {
            if let Err(error) = self.init_module(record, mount, env).await {
                record.init = false;
                record.state = match error {
                    Error::LicenseCheckFailed { .. } => LoadState::Rejected,
                    _ => LoadState::InitFailed,
                };
                error!(module = %record.name, "init failed: {}", error.display_chain());
                failure = Some(ModuleFailure {
                    module: record.name.clone(),
                    error,
                });
                break;
            }
            record.state = LoadState::InitLoaded;
        }

        if failure.is_none() {
            info!("Finish init loading modules");
        }
        Ok(PhaseOneOutcome {
            sequence: BootSequence { records },
            failure,
        })
    }

    async fn init_module(
        &self,
        record: &mut LoadedModule,
        mount: &H::Mount,
        env: &H::Env,
    ) -> Result<()> {
        let Some(entry) = self.plugins.init_entry(&record.name) else {
            debug!(module = %record.name, "no init entry point");
            return Ok(());
        };

        if !self.license.is_licensed(&record.name).await {
            return Err(Error::license_check_failed(&record.name, BootPhase::Init));
        }
        record.valid = true;

        entry
            .init(InitContext {
                module: &record.name,
                mount,
                app_root: &self.app_root,
                env,
            })
            .await
            .map_err(|e| Error::entry_point(&record.name, BootPhase::Init, e))?;

        info!(module = %record.name, "init loaded");
        Ok(())
    }

    /// Run the phase-2 entry point of every module that passed phase 1
    ///
    /// Only modules in [`LoadState::InitLoaded`] take part, so handing in an
    /// aborted sequence runs nothing past the failing module.
    ///
    /// Modules run one at a time in phase-1 order. A failure is logged,
    /// recorded, and the next module still runs. Consumes the sequence.
    pub async fn run_phase_two(
        &self,
        sequence: BootSequence,
        server: &H::Server,
        api_router: &H::Mount,
        auth: &H::Auth,
    ) -> PhaseTwoReport {
        let survivors: Vec<LoadedModule> = sequence
            .records
            .into_iter()
            .filter(|record| record.init && record.state == LoadState::InitLoaded)
            .collect();

        let mut report = PhaseTwoReport::default();
        if survivors.is_empty() {
            debug!("No modules for initAfter");
            return report;
        }

        info!("Start initAfter loading modules");
        for mut record in survivors {
            match self
                .init_after_module(&mut record, server, api_router, auth)
                .await
            {
                Ok(()) => record.state = LoadState::InitAfterLoaded,
                Err(error) => {
                    error!(module = %record.name, "initAfter failed: {}", error.display_chain());
                    record.state = LoadState::InitAfterFailed;
                    report.failures.push(ModuleFailure {
                        module: record.name.clone(),
                        error,
                    });
                }
            }
            report.modules.push(record);
        }
        info!("Finish initAfter loading modules");

        report
    }

    async fn init_after_module(
        &self,
        record: &mut LoadedModule,
        server: &H::Server,
        api_router: &H::Mount,
        auth: &H::Auth,
    ) -> Result<()> {
        let Some(entry) = self.plugins.init_after_entry(&record.name) else {
            debug!(module = %record.name, "no initAfter entry point");
            return Ok(());
        };

        if !record.valid {
            if !self.license.is_licensed(&record.name).await {
                return Err(Error::license_check_failed(
                    &record.name,
                    BootPhase::InitAfter,
                ));
            }
            record.valid = true;
        }

        entry
            .init_after(InitAfterContext {
                module: &record.name,
                server,
                api_router,
                auth,
            })
            .await
            .map_err(|e| Error::entry_point(&record.name, BootPhase::InitAfter, e))?;

        info!(module = %record.name, "initAfter loaded");
        Ok(())
    }
}
