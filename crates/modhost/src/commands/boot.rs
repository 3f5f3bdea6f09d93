//! Boot command
//!
//! Discovers script entry points under the modules directory and runs both
//! boot phases over the active modules of the registry.

use anyhow::{bail, Result};
use modhost_lifecycle::{
    discover_script_plugins, license_gate_from_config, AuthRealm, LoadState, MountPoint,
    ServerInfo, TwoPhaseLoader,
};
use std::collections::BTreeMap;

use super::{load_config, open_registry, report_error, GlobalArgs};
use crate::cli::BootArgs;
use crate::output;

pub async fn run(args: BootArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let plugins = discover_script_plugins(&config.modules_path()).await?;
    let loader = TwoPhaseLoader::new(
        open_registry(&config),
        plugins,
        license_gate_from_config(&config.licensing),
        config.app_root.clone(),
    );

    let env = BTreeMap::from([
        ("MODHOST_THEME".to_string(), config.current_theme.clone()),
        ("MODHOST_THEMES_PATH".to_string(), config.themes_path().to_string()),
    ]);
    let mount = MountPoint {
        base_path: args.mount_path.clone(),
    };

    let outcome = loader.run_phase_one(&mount, &env).await?;
    if let Some(failure) = &outcome.failure {
        if args.json {
            println!("{}", serde_json::to_string_pretty(outcome.sequence.records())?);
        } else {
            report_error(&failure.error);
        }
        bail!("Boot aborted in init at module {}", failure.module);
    }

    let server = ServerInfo {
        address: args.address.clone(),
    };
    let api_router = MountPoint {
        base_path: args.api_path.clone(),
    };
    let auth = AuthRealm {
        name: args.auth_realm.clone(),
    };
    let report = loader
        .run_phase_two(outcome.sequence, &server, &api_router, &auth)
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.modules)?);
        return Ok(());
    }

    if report.modules.is_empty() {
        output::info("No active modules");
        return Ok(());
    }

    output::header("Boot");
    for module in &report.modules {
        match module.state {
            LoadState::InitAfterLoaded => output::success(&module.name),
            _ => output::warning(&format!("{} skipped in initAfter", module.name)),
        }
    }
    for failure in &report.failures {
        output::item(&format!(
            "{}: {}",
            failure.module,
            failure.error.display_chain()
        ));
    }
    Ok(())
}
