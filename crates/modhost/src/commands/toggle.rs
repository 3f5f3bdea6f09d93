//! Activate and deactivate commands
//!
//! The matching check runs first; a refused transition leaves the registry
//! file untouched.

use anyhow::{bail, Result};
use modhost_lifecycle::{activate_module, deactivate_module};

use super::{load_config, open_registry, report_error, GlobalArgs};
use crate::cli::ModuleArgs;
use crate::output;

pub async fn activate(args: ModuleArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;

    if let Err(err) = activate_module(open_registry(&config), &args.name).await {
        report_error(&err);
        bail!("{} was not activated", args.name);
    }

    output::success(&format!("Activated {}", args.name));
    Ok(())
}

pub async fn deactivate(args: ModuleArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;

    if let Err(err) = deactivate_module(open_registry(&config), &args.name).await {
        report_error(&err);
        bail!("{} was not deactivated", args.name);
    }

    output::success(&format!("Deactivated {}", args.name));
    Ok(())
}
