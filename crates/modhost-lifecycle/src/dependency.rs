//! Package dependency merging
//!
//! Collects, for every package a target module requires, the versions the
//! target and the active modules require for it. Packages the target does not
//! require are ignored: the result describes what coexisting with the target
//! looks like, not what every module needs.

use modhost_core::types::{MergeMode, MergedDependencyMap, ModuleDescriptor};

/// Merge `target`'s package requirements with those of `active_modules`
///
/// In [`MergeMode::Install`] each package maps to a de-duplicated set of
/// versions; in [`MergeMode::Uninstall`] to every version in collection order
/// (target first, then active modules in the order given).
pub fn merge_package_dependencies(
    target: &ModuleDescriptor,
    active_modules: &[ModuleDescriptor],
    mode: MergeMode,
) -> MergedDependencyMap {
    let mut merged = MergedDependencyMap::new(mode);

    for (ecosystem, packages) in &target.package_dependencies {
        for (package, version) in packages {
            merged.record(*ecosystem, package, version);

            for other in active_modules {
                let Some(other_packages) = other.package_dependencies.get(ecosystem) else {
                    continue;
                };
                if let Some(other_version) = other_packages.get(package) {
                    merged.record(*ecosystem, package, other_version);
                }
            }
        }
    }

    merged
}
