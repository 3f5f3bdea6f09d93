//! Integration tests for the activate and deactivate commands
//!
//! Drives the registry file the commands write through the same lifecycle
//! functions, using a YAML registry in a temporary directory.

use camino::Utf8PathBuf;
use modhost_core::Error;
use modhost_lifecycle::{activate_module, deactivate_module, ModuleStore, YamlModuleStore};
use std::sync::Arc;
use tempfile::TempDir;

const REGISTRY: &str = "\
modules:
  - name: shop
    active: true
  - name: stock
    active: true
    moduleDependencies: [shop]
  - name: media
    moduleDependencies: [pricing]
";

fn registry_in(dir: &TempDir) -> (Utf8PathBuf, Arc<YamlModuleStore>) {
    let path = Utf8PathBuf::from_path_buf(dir.path().join("modules.yaml")).unwrap();
    std::fs::write(&path, REGISTRY).unwrap();
    let store = Arc::new(YamlModuleStore::new(path.clone()));
    (path, store)
}

#[tokio::test]
async fn test_refused_deactivation_leaves_registry_untouched() {
    let dir = TempDir::new().unwrap();
    let (path, store) = registry_in(&dir);
    let before = std::fs::read(&path).unwrap();

    let err = deactivate_module(store, "shop").await.unwrap_err();

    assert!(matches!(err, Error::RequiredModuleDependencies { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn test_refused_activation_leaves_registry_untouched() {
    let dir = TempDir::new().unwrap();
    let (path, store) = registry_in(&dir);
    let before = std::fs::read(&path).unwrap();

    let err = activate_module(store, "media").await.unwrap_err();

    assert!(matches!(err, Error::MissingModuleDependencies { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn test_allowed_deactivation_flips_active() {
    let dir = TempDir::new().unwrap();
    let (_path, store) = registry_in(&dir);

    deactivate_module(store.clone(), "stock").await.unwrap();

    assert!(!store.get("stock").await.unwrap().unwrap().active);
    assert!(store.get("shop").await.unwrap().unwrap().active);

    // shop has no active dependents left
    deactivate_module(store.clone(), "shop").await.unwrap();
    assert!(!store.get("shop").await.unwrap().unwrap().active);
}

#[tokio::test]
async fn test_unknown_module_is_not_found() {
    let dir = TempDir::new().unwrap();
    let (path, store) = registry_in(&dir);
    let before = std::fs::read(&path).unwrap();

    let err = activate_module(store, "ghost").await.unwrap_err();

    assert_eq!(err.status(), 404);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}
