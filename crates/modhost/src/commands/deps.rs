//! Merged package dependencies command

use anyhow::Result;
use modhost_core::types::MergeMode;
use modhost_lifecycle::ModuleManager;

use super::{load_config, open_registry, GlobalArgs};
use crate::cli::DepsArgs;
use crate::output;

pub async fn run(args: DepsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let manager = ModuleManager::new(open_registry(&config));

    let mode = if args.uninstall {
        MergeMode::Uninstall
    } else {
        MergeMode::Install
    };
    let merged = manager.merged_dependencies(&args.name, mode).await?;
    let divergent = merged.divergent();

    if args.json {
        let divergent: Vec<_> = divergent
            .iter()
            .map(|(ecosystem, package)| format!("{}/{}", ecosystem, package))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "dependencies": merged,
                "divergent": divergent,
            }))?
        );
        return Ok(());
    }

    if merged.is_empty() {
        output::info(&format!("{} declares no package dependencies", args.name));
        return Ok(());
    }

    output::header(&format!("Package dependencies of {}", args.name));
    for (ecosystem, package, versions) in merged.iter() {
        output::kv(
            &format!("{}/{}", ecosystem, package),
            &versions.versions().join(", "),
        );
    }

    for (ecosystem, package) in &divergent {
        output::warning(&format!(
            "{}/{} is required at different versions",
            ecosystem, package
        ));
    }
    Ok(())
}
