//! Theme module list and uploaded archive housekeeping
//!
//! These helpers never fail: problems are logged and the caller carries on.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, error, info};

/// File name of a theme's module list
pub const MODULE_LIST_FILE: &str = "list_modules.js";

/// Content of a freshly created module list
pub const EMPTY_MODULE_LIST: &str = "export default [];";

/// `{themes_path}/{theme}/modules/list_modules.js`
pub fn module_list_path(themes_path: &Utf8Path, theme: &str) -> Utf8PathBuf {
    themes_path.join(theme).join("modules").join(MODULE_LIST_FILE)
}

/// Create the theme's module list if it does not exist yet
///
/// Returns the list path when the file exists afterwards.
pub async fn ensure_module_list(themes_path: &Utf8Path, theme: &str) -> Option<Utf8PathBuf> {
    let path = module_list_path(themes_path, theme);
    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        debug!("Module list {} already exists", path);
        return Some(path);
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            error!("Cannot create {}: {}", parent, e);
            return None;
        }
    }
    match tokio::fs::write(&path, EMPTY_MODULE_LIST).await {
        Ok(()) => {
            info!("Created module list {}", path);
            Some(path)
        }
        Err(e) => {
            error!("Cannot write {}: {}", path, e);
            None
        }
    }
}

/// Read the theme's module list
pub async fn read_module_list(themes_path: &Utf8Path, theme: &str) -> Option<String> {
    let path = module_list_path(themes_path, theme);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => {
            info!("{}: {}", path, content.trim());
            Some(content)
        }
        Err(e) => {
            error!("Cannot read {}: {}", path, e);
            None
        }
    }
}

/// Remove an uploaded `.zip` archive and the directory it was extracted to
pub async fn discard_module_archive(archive: &Utf8Path) {
    match tokio::fs::remove_file(archive).await {
        Ok(()) => debug!("Removed {}", archive),
        Err(e) => error!("Cannot remove {}: {}", archive, e),
    }

    let Some(extracted) = extracted_dir(archive) else {
        debug!("{} is not a .zip archive, no extracted directory", archive);
        return;
    };
    match tokio::fs::remove_dir_all(&extracted).await {
        Ok(()) => debug!("Removed {}", extracted),
        Err(e) => error!("Cannot remove {}: {}", extracted, e),
    }
}

/// Directory a `.zip` archive was extracted to; `None` for other files
fn extracted_dir(archive: &Utf8Path) -> Option<Utf8PathBuf> {
    archive.as_str().strip_suffix(".zip").map(Utf8PathBuf::from)
}
