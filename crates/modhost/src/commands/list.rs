//! List command

use anyhow::Result;
use modhost_lifecycle::{ModuleFilter, ModuleStore};

use super::{load_config, open_registry, GlobalArgs};
use crate::cli::ListArgs;
use crate::output;

pub async fn run(args: ListArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let store = open_registry(&config);

    let filter = if args.active {
        ModuleFilter::active()
    } else {
        ModuleFilter::all()
    };
    let modules = store.find(&filter).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    if modules.is_empty() {
        output::info(&format!("No modules in {}", store.path()));
        return Ok(());
    }

    output::header("Modules");
    for module in &modules {
        let state = if module.active { "active" } else { "inactive" };
        let deps = module.dependencies();
        if deps.is_empty() {
            output::kv(&module.name, state);
        } else {
            output::kv(
                &module.name,
                &format!("{} (requires {})", state, deps.join(", ")),
            );
        }
    }
    Ok(())
}
