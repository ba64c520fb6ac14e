//! Dependency model
//!
//! Two layers live here:
//!
//! - [`Dependency`] / [`DependencyList`]: what a Version persists for each of
//!   its runtime, dev and peer component dependencies.
//! - [`DependencyEntry`]: a typed view over everything a Version depends on
//!   (components, packages, extensions) with its [`Lifecycle`], used by the
//!   graph builder and the manifest deduper.

use super::id::ComponentId;
use super::paths::is_valid_path;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Dependency list validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DependencyError {
    #[error("failed validating dependency {id}. the dependency id has no version")]
    MissingVersion { id: String },

    #[error("failed validating dependency {id}. the dependency id has no scope")]
    MissingScope { id: String },

    #[error("failed validating dependency {id}. relativePaths.{field} \"{path}\" is invalid")]
    InvalidRelativePath {
        id: String,
        field: &'static str,
        path: String,
    },

    #[error("failed validating dependency {id}. importSpecifier.mainFile.name is empty")]
    EmptyImportSpecifier { id: String },

    #[error(
        "failed validating the dependencies. one of the dependencies has the same id as the component {id}"
    )]
    SameAsComponent { id: String },
}

/// When a dependency is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Runtime,
    Dev,
    Peer,
}

impl Lifecycle {
    pub const ALL: [Lifecycle; 3] = [Lifecycle::Runtime, Lifecycle::Dev, Lifecycle::Peer];

    /// Name of the Version / package.json field holding this lifecycle
    pub fn field_name(&self) -> &'static str {
        match self {
            Lifecycle::Runtime => "dependencies",
            Lifecycle::Dev => "devDependencies",
            Lifecycle::Peer => "peerDependencies",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Runtime => write!(f, "runtime"),
            Lifecycle::Dev => write!(f, "dev"),
            Lifecycle::Peer => write!(f, "peer"),
        }
    }
}

/// Main-file import recorded by static analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainFileSpecifier {
    pub is_default: bool,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub main_file: MainFileSpecifier,
}

/// Link between a file of the dependent and a file of the dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RelativePath {
    pub source_relative_path: String,
    pub destination_relative_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_specifiers: Option<Vec<ImportSpecifier>>,
}

/// A persisted component dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Dependency {
    pub id: ComponentId,
    #[serde(default)]
    pub relative_paths: Vec<RelativePath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_range: Option<String>,
}

impl Dependency {
    pub fn new(id: ComponentId) -> Self {
        Self {
            id,
            relative_paths: Vec::new(),
            package_name: None,
            version_range: None,
        }
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    fn validate(&self) -> Result<(), DependencyError> {
        let id = self.id.to_string();
        if !self.id.has_version() {
            return Err(DependencyError::MissingVersion { id });
        }
        if !self.id.has_scope() {
            return Err(DependencyError::MissingScope { id });
        }
        for relative_path in &self.relative_paths {
            for (field, path) in [
                ("sourceRelativePath", &relative_path.source_relative_path),
                (
                    "destinationRelativePath",
                    &relative_path.destination_relative_path,
                ),
            ] {
                if !is_valid_path(path) {
                    return Err(DependencyError::InvalidRelativePath {
                        id,
                        field,
                        path: path.clone(),
                    });
                }
            }
            let mut specifiers = relative_path.import_specifiers.iter().flatten();
            if specifiers.any(|s| s.main_file.name.is_empty()) {
                return Err(DependencyError::EmptyImportSpecifier { id });
            }
        }
        Ok(())
    }
}

/// Ordered dependencies, unique by full id string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyList(Vec<Dependency>);

impl DependencyList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append unless a dependency with the same full id is already present
    pub fn add(&mut self, dependency: Dependency) -> bool {
        let key = dependency.id.to_string();
        if self.0.iter().any(|d| d.id.to_string() == key) {
            return false;
        }
        self.0.push(dependency);
        true
    }

    pub fn get(&self) -> &[Dependency] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dependency> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, id: &ComponentId) -> bool {
        self.0.iter().any(|d| &d.id == id)
    }

    /// Check every dependency, and that none of them is the owner itself
    pub fn validate(&self, owner: Option<&ComponentId>) -> Result<(), DependencyError> {
        for dependency in &self.0 {
            dependency.validate()?;
        }
        if let Some(owner) = owner {
            if self.has(owner) {
                return Err(DependencyError::SameAsComponent {
                    id: owner.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<Dependency> for DependencyList {
    fn from_iter<T: IntoIterator<Item = Dependency>>(iter: T) -> Self {
        let mut list = DependencyList::new();
        for dependency in iter {
            list.add(dependency);
        }
        list
    }
}

impl<'de> Deserialize<'de> for DependencyList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<Dependency>::deserialize(deserializer)?;
        let mut seen = HashSet::new();
        for dependency in &raw {
            if !seen.insert(dependency.id.to_string()) {
                return Err(serde::de::Error::custom(format!(
                    "dependency {} is listed more than once",
                    dependency.id
                )));
            }
        }
        Ok(Self(raw))
    }
}

impl<'a> IntoIterator for &'a DependencyList {
    type Item = &'a Dependency;
    type IntoIter = std::slice::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Typed view over a single thing a Version depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyEntry {
    /// Another component, optionally published under a package name
    Component {
        id: ComponentId,
        lifecycle: Lifecycle,
        package_name: Option<String>,
    },
    /// A third-party package requested by name and range
    Package {
        name: String,
        range: String,
        lifecycle: Lifecycle,
    },
    /// An extension (aspect) the component is configured with
    Extension { id: ComponentId },
}

impl DependencyEntry {
    pub fn lifecycle(&self) -> Lifecycle {
        match self {
            DependencyEntry::Component { lifecycle, .. } => *lifecycle,
            DependencyEntry::Package { lifecycle, .. } => *lifecycle,
            // extensions are only needed while developing
            DependencyEntry::Extension { .. } => Lifecycle::Dev,
        }
    }

    /// Package name and range to install, when this entry is installable
    pub fn manifest_entry(&self) -> Option<(String, String)> {
        match self {
            DependencyEntry::Package { name, range, .. } => Some((name.clone(), range.clone())),
            DependencyEntry::Component {
                id,
                package_name: Some(package_name),
                ..
            } => id
                .version
                .as_ref()
                .filter(|v| v.is_concrete())
                .map(|v| (package_name.clone(), v.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("dependencies.test.rs");
}
