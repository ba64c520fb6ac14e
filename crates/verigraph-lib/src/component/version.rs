//! The Version object: an immutable, content-addressed snapshot of a component

use super::dependencies::{DependencyEntry, DependencyList, Lifecycle};
use super::extensions::ExtensionDataList;
use super::hash::Ref;
use super::id::{ComponentId, ComponentIdList};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Package name to version, range or URL
pub type PackageDependencies = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub relative_path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file: Ref,
}

impl SourceFile {
    /// A file named after the last segment of its path, hashed from its content
    pub fn from_content(relative_path: impl Into<String>, content: &[u8]) -> Self {
        let relative_path = relative_path.into();
        let name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or(relative_path.as_str())
            .to_string();
        Self {
            relative_path,
            name,
            file: Ref::of(content),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Object schema a Version was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaName {
    #[serde(rename = "0.0.0")]
    Legacy,
    #[serde(rename = "1.0.0")]
    Harmony,
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaName::Legacy => f.write_str("0.0.0"),
            SchemaName::Harmony => f.write_str("1.0.0"),
        }
    }
}

/// History of a component that was merged in without a common ancestor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unrelated {
    pub head: Ref,
}

/// Fields only legacy-schema objects may carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tester: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dists: Option<Vec<SourceFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_dist_file: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_resolved_paths: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub compiler_package_dependencies: PackageDependencies,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tester_package_dependencies: PackageDependencies,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(default)]
    pub main_file: String,
    #[serde(default)]
    pub files: Vec<SourceFile>,

    #[serde(default)]
    pub dependencies: DependencyList,
    #[serde(default)]
    pub dev_dependencies: DependencyList,
    #[serde(default)]
    pub peer_dependencies: DependencyList,

    #[serde(default)]
    pub package_dependencies: PackageDependencies,
    #[serde(default)]
    pub dev_package_dependencies: PackageDependencies,
    #[serde(default)]
    pub peer_package_dependencies: PackageDependencies,

    #[serde(default)]
    pub flattened_dependencies: ComponentIdList,
    #[serde(default)]
    pub extensions: ExtensionDataList,

    #[serde(default)]
    pub parents: Vec<Ref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<Log>,

    /// Per-component overrides of the workspace dependency policy
    #[serde(default)]
    pub overrides: BTreeMap<String, serde_json::Value>,
    /// package.json props the component changed from their generated values
    #[serde(default)]
    pub package_json_changed_props: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrelated: Option<Unrelated>,
    /// Version of the tool that wrote this object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_version: Option<semver::Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_prefix: Option<String>,

    #[serde(flatten)]
    pub legacy: LegacyFields,
}

impl Version {
    /// Content address of this object: SHA-1 of its JSON form
    pub fn hash(&self) -> Ref {
        // string-keyed maps and plain structs only, serialization cannot fail
        let bytes = serde_json::to_vec(self).expect("Version is always serializable");
        Ref::of(&bytes)
    }

    /// Objects without a schema predate the current one
    pub fn is_legacy(&self) -> bool {
        matches!(self.schema, None | Some(SchemaName::Legacy))
    }

    pub fn dependency_list(&self, lifecycle: Lifecycle) -> &DependencyList {
        match lifecycle {
            Lifecycle::Runtime => &self.dependencies,
            Lifecycle::Dev => &self.dev_dependencies,
            Lifecycle::Peer => &self.peer_dependencies,
        }
    }

    pub fn package_dependency_map(&self, lifecycle: Lifecycle) -> &PackageDependencies {
        match lifecycle {
            Lifecycle::Runtime => &self.package_dependencies,
            Lifecycle::Dev => &self.dev_package_dependencies,
            Lifecycle::Peer => &self.peer_package_dependencies,
        }
    }

    /// Runtime, dev and peer component dependency ids; extensions excluded
    pub fn dependencies_ids_exclude_extensions(&self) -> ComponentIdList {
        Lifecycle::ALL
            .iter()
            .flat_map(|lifecycle| self.dependency_list(*lifecycle).iter())
            .map(|dep| dep.id.clone())
            .collect()
    }

    /// Everything this Version depends on, as typed entries
    pub fn dependency_entries(&self) -> Vec<DependencyEntry> {
        let mut entries = Vec::new();
        for lifecycle in Lifecycle::ALL {
            entries.extend(self.dependency_list(lifecycle).iter().map(|dep| {
                DependencyEntry::Component {
                    id: dep.id.clone(),
                    lifecycle,
                    package_name: dep.package_name.clone(),
                }
            }));
            entries.extend(self.package_dependency_map(lifecycle).iter().map(
                |(name, range)| DependencyEntry::Package {
                    name: name.clone(),
                    range: range.clone(),
                    lifecycle,
                },
            ));
        }
        entries.extend(
            self.extensions
                .extension_ids()
                .into_iter()
                .map(|id| DependencyEntry::Extension { id }),
        );
        entries
    }

    /// Human readable label for error messages
    pub(crate) fn describe(&self, owner: Option<&ComponentId>) -> String {
        match owner {
            Some(id) => format!("unable to save Version object of \"{}\"", id),
            None => format!("unable to save Version object hash {}", self.hash()),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("version.test.rs");
}
