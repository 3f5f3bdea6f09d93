//! Theme module list commands

use anyhow::{bail, Result};

use super::{load_config, GlobalArgs};
use crate::cli::{ThemeArgs, ThemeCommands};
use crate::output;
use modhost_lifecycle::{ensure_module_list, read_module_list};

pub async fn run(cmd: ThemeCommands, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let themes_path = config.themes_path();
    let theme_of = |args: ThemeArgs| args.theme.unwrap_or_else(|| config.current_theme.clone());

    match cmd {
        ThemeCommands::Init(args) => {
            let theme = theme_of(args);
            match ensure_module_list(&themes_path, &theme).await {
                Some(path) => output::success(&format!("Module list ready at {}", path)),
                None => bail!("Could not create the module list of theme {}", theme),
            }
        }
        ThemeCommands::Show(args) => {
            let theme = theme_of(args);
            match read_module_list(&themes_path, &theme).await {
                Some(content) => println!("{}", content.trim_end()),
                None => bail!("Theme {} has no module list", theme),
            }
        }
    }
    Ok(())
}
