//! Activation and deactivation checks

use anyhow::{bail, Result};
use modhost_lifecycle::ModuleManager;

use super::{load_config, open_registry, report_error, GlobalArgs};
use crate::cli::{CheckArgs, CheckCommands};
use crate::output;

pub async fn run(cmd: CheckCommands, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let manager = ModuleManager::new(open_registry(&config));

    let (args, outcome, verb) = match cmd {
        CheckCommands::Install(args) => {
            let outcome = manager.check_install_by_name(&args.name).await;
            (args, outcome, "activated")
        }
        CheckCommands::Uninstall(args) => {
            let outcome = manager.check_uninstall_by_name(&args.name).await;
            (args, outcome, "deactivated")
        }
    };

    print_outcome(&args, outcome, verb)
}

fn print_outcome(args: &CheckArgs, outcome: modhost_core::Result<()>, verb: &str) -> Result<()> {
    match outcome {
        Ok(()) => {
            if args.json {
                println!("{}", serde_json::json!({ "allowed": true }));
            } else {
                output::success(&format!("{} can be {}", args.name, verb));
            }
            Ok(())
        }
        Err(err) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "allowed": false,
                        "code": err.code(),
                        "status": err.status(),
                        "datas": err.datas(),
                    })
                );
            } else {
                report_error(&err);
            }
            bail!("{} cannot be {}", args.name, verb)
        }
    }
}
