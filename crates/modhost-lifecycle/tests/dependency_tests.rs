//! Package dependency merge tests
//!
//! Covers merging a target module's package requirements with those of the
//! active modules, in both merge modes.

mod common;

use common::*;
use modhost_core::types::{Ecosystem, MergeMode, VersionBucket};
use modhost_lifecycle::{merge_package_dependencies, ModuleManager};

#[test]
fn test_install_mode_deduplicates_versions() {
    let target = ModuleBuilder::new("shop")
        .api_package("lodash", "^4.17.0")
        .build();
    let active = vec![
        ModuleBuilder::active("stock").api_package("lodash", "^4.17.0").build(),
        ModuleBuilder::active("media").api_package("lodash", "^3.10.0").build(),
    ];

    let merged = merge_package_dependencies(&target, &active, MergeMode::Install);
    let bucket = merged.get(Ecosystem::Api, "lodash").unwrap();

    assert!(matches!(bucket, VersionBucket::Distinct(_)));
    assert_eq!(bucket.len(), 2);
    assert_eq!(merged.divergent(), vec![(Ecosystem::Api, "lodash".to_string())]);
}

#[test]
fn test_uninstall_mode_keeps_duplicates_in_order() {
    let target = ModuleBuilder::new("shop")
        .api_package("lodash", "^4.17.0")
        .build();
    let active = vec![
        ModuleBuilder::active("stock").api_package("lodash", "^4.17.0").build(),
        ModuleBuilder::active("media").api_package("lodash", "^3.10.0").build(),
    ];

    let merged = merge_package_dependencies(&target, &active, MergeMode::Uninstall);

    assert_eq!(
        merged.get(Ecosystem::Api, "lodash").unwrap().versions(),
        vec!["^4.17.0", "^4.17.0", "^3.10.0"]
    );
}

#[test]
fn test_packages_outside_target_are_ignored() {
    let target = ModuleBuilder::new("shop")
        .theme_package("react", "18.2.0")
        .build();
    let active = vec![ModuleBuilder::active("stock")
        .theme_package("vue", "3.4.0")
        .api_package("react", "17.0.0")
        .build()];

    let merged = merge_package_dependencies(&target, &active, MergeMode::Install);

    assert!(!merged.contains(Ecosystem::Theme, "vue"));
    // same package name in another ecosystem does not count
    assert!(!merged.contains(Ecosystem::Api, "react"));
    assert_eq!(
        merged.get(Ecosystem::Theme, "react").unwrap().versions(),
        vec!["18.2.0"]
    );
    assert!(merged.divergent().is_empty());
}

#[tokio::test]
async fn test_manager_merges_against_other_active_modules_only() {
    let store = memory_store(vec![
        ModuleBuilder::active("shop").api_package("lodash", "^4.17.0").build(),
        ModuleBuilder::active("stock").api_package("lodash", "^4.0.0").build(),
        ModuleBuilder::new("archive").api_package("lodash", "^2.0.0").build(),
    ]);
    let manager = ModuleManager::new(store);

    let merged = manager
        .merged_dependencies("shop", MergeMode::Uninstall)
        .await
        .unwrap();

    assert_eq!(
        merged.get(Ecosystem::Api, "lodash").unwrap().versions(),
        vec!["^4.17.0", "^4.0.0"]
    );
}
