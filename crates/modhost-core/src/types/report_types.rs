//! Transient values produced by the dependency checks

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::Ecosystem;

/// Outcome of checking a module's dependencies before activation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallReport {
    /// Declared dependencies with no registry entry
    pub missing_dependencies: Vec<String>,

    /// Declared dependencies that exist but are inactive
    pub need_activation: Vec<String>,
}

impl InstallReport {
    pub fn is_empty(&self) -> bool {
        self.missing_dependencies.is_empty() && self.need_activation.is_empty()
    }
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing [{}], needs activation [{}]",
            self.missing_dependencies.join(", "),
            self.need_activation.join(", ")
        )
    }
}

/// Outcome of checking who still depends on a module before deactivation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UninstallReport {
    /// Active modules that must be deactivated first
    pub need_deactivation: Vec<String>,
}

impl UninstallReport {
    pub fn is_empty(&self) -> bool {
        self.need_deactivation.is_empty()
    }
}

impl fmt::Display for UninstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "needs deactivation [{}]", self.need_deactivation.join(", "))
    }
}

/// Direction of a dependency merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Versions are de-duplicated
    Install,
    /// Versions keep every occurrence, in collection order
    Uninstall,
}

/// Versions collected for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VersionBucket {
    Distinct(BTreeSet<String>),
    Ordered(Vec<String>),
}

impl VersionBucket {
    pub fn new(mode: MergeMode) -> Self {
        match mode {
            MergeMode::Install => VersionBucket::Distinct(BTreeSet::new()),
            MergeMode::Uninstall => VersionBucket::Ordered(Vec::new()),
        }
    }

    pub fn push(&mut self, version: impl Into<String>) {
        match self {
            VersionBucket::Distinct(set) => {
                set.insert(version.into());
            }
            VersionBucket::Ordered(list) => list.push(version.into()),
        }
    }

    /// Collected versions
    ///
    /// `Distinct` yields them sorted lexicographically, not in the order they
    /// were pushed. `Ordered` yields them in collection order.
    pub fn versions(&self) -> Vec<&str> {
        match self {
            VersionBucket::Distinct(set) => set.iter().map(String::as_str).collect(),
            VersionBucket::Ordered(list) => list.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VersionBucket::Distinct(set) => set.len(),
            VersionBucket::Ordered(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of different version strings, regardless of mode
    pub fn distinct_count(&self) -> usize {
        match self {
            VersionBucket::Distinct(set) => set.len(),
            VersionBucket::Ordered(list) => list.iter().collect::<BTreeSet<_>>().len(),
        }
    }
}

/// Package versions required by a target module and the active modules
/// sharing those packages, per ecosystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedDependencyMap {
    #[serde(skip)]
    mode: MergeMode,

    #[serde(flatten)]
    entries: BTreeMap<Ecosystem, BTreeMap<String, VersionBucket>>,
}

impl MergedDependencyMap {
    /// Create a map with an empty table for every ecosystem
    pub fn new(mode: MergeMode) -> Self {
        let entries = Ecosystem::ALL
            .iter()
            .map(|eco| (*eco, BTreeMap::new()))
            .collect();
        Self { mode, entries }
    }

    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    /// Ensure a bucket exists for `package`
    pub fn seed(&mut self, ecosystem: Ecosystem, package: &str) -> &mut VersionBucket {
        let mode = self.mode;
        self.entries
            .entry(ecosystem)
            .or_default()
            .entry(package.to_string())
            .or_insert_with(|| VersionBucket::new(mode))
    }

    /// Record `version` for `package`, seeding the bucket if needed
    pub fn record(&mut self, ecosystem: Ecosystem, package: &str, version: &str) {
        self.seed(ecosystem, package).push(version);
    }

    pub fn contains(&self, ecosystem: Ecosystem, package: &str) -> bool {
        self.get(ecosystem, package).is_some()
    }

    pub fn get(&self, ecosystem: Ecosystem, package: &str) -> Option<&VersionBucket> {
        self.entries.get(&ecosystem)?.get(package)
    }

    /// Package table for one ecosystem
    pub fn ecosystem(&self, ecosystem: Ecosystem) -> Option<&BTreeMap<String, VersionBucket>> {
        self.entries.get(&ecosystem)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ecosystem, &str, &VersionBucket)> {
        self.entries.iter().flat_map(|(eco, packages)| {
            packages
                .iter()
                .map(move |(name, bucket)| (*eco, name.as_str(), bucket))
        })
    }

    /// True when no ecosystem holds a package
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }

    /// Packages for which more than one distinct version was collected
    pub fn divergent(&self) -> Vec<(Ecosystem, String)> {
        self.iter()
            .filter(|(_, _, bucket)| bucket.distinct_count() > 1)
            .map(|(eco, name, _)| (eco, name.to_string()))
            .collect()
    }
}
