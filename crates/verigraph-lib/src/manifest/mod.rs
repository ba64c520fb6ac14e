//! # Manifest Module
//!
//! Reduces the dependency requests of many components into one installable
//! root manifest.
//!
//! ## Modules
//!
//! - [`dedupe`] - Per-component reduction and cross-component hoisting
//! - [`merge_with_root`] - Adding root-level declarations to a deduped result

pub mod dedupe;
pub mod merge_with_root;

pub use dedupe::{ComponentManifest, PackageUsage, component_usages, dedupe_dependencies};
pub use merge_with_root::merge_with_root_deps;

use crate::component::{Lifecycle, Version};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Package name to requested range
pub type DepObject = BTreeMap<String, String>;

/// The three dependency fields of a package manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDependencies {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: DepObject,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: DepObject,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_dependencies: DepObject,
}

impl ManifestDependencies {
    pub fn get(&self, lifecycle: Lifecycle) -> &DepObject {
        match lifecycle {
            Lifecycle::Runtime => &self.dependencies,
            Lifecycle::Dev => &self.dev_dependencies,
            Lifecycle::Peer => &self.peer_dependencies,
        }
    }

    pub fn get_mut(&mut self, lifecycle: Lifecycle) -> &mut DepObject {
        match lifecycle {
            Lifecycle::Runtime => &mut self.dependencies,
            Lifecycle::Dev => &mut self.dev_dependencies,
            Lifecycle::Peer => &mut self.peer_dependencies,
        }
    }

    /// Whether `name` appears in any of the three fields
    pub fn contains(&self, name: &str) -> bool {
        Lifecycle::ALL
            .iter()
            .any(|lifecycle| self.get(*lifecycle).contains_key(name))
    }

    pub fn is_empty(&self) -> bool {
        Lifecycle::ALL
            .iter()
            .all(|lifecycle| self.get(*lifecycle).is_empty())
    }

    /// Installable requests of a Version: its package dependencies plus the
    /// component dependencies that are published under a package name
    pub fn from_version(version: &Version) -> Self {
        let mut manifest = Self::default();
        for entry in version.dependency_entries() {
            if let Some((name, range)) = entry.manifest_entry() {
                manifest
                    .get_mut(entry.lifecycle())
                    .entry(name)
                    .or_insert(range);
            }
        }
        manifest
    }
}

/// Output of the deduper, consumed by package installers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupedDependencies {
    pub root_dependencies: ManifestDependencies,
    /// Component id -> requests that could not be hoisted to the root
    #[serde(default)]
    pub component_dependencies_map: BTreeMap<String, ManifestDependencies>,
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
