//! Extension (aspect) configuration attached to a Version

use super::hash::Ref;
use super::id::{ComponentId, ComponentIdList};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A file produced by a build task and stored with the Version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRef {
    pub relative_path: String,
    #[serde(rename = "ref")]
    pub file: Ref,
}

/// Artifacts produced by one task of an extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFiles {
    pub name: String,
    #[serde(default)]
    pub refs: Vec<ArtifactRef>,
}

impl ArtifactFiles {
    /// Paths that occur more than once, compared case-insensitively
    pub fn duplicate_paths(&self) -> Vec<String> {
        duplicates_ignore_case(self.refs.iter().map(|r| r.relative_path.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDataEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<ComponentId>,
    /// Core extensions are addressed by name only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactFiles>,
}

impl ExtensionDataEntry {
    pub fn from_id(id: ComponentId) -> Self {
        Self {
            extension_id: Some(id),
            ..Default::default()
        }
    }

    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn string_id(&self) -> Option<String> {
        match (&self.extension_id, &self.name) {
            (Some(id), _) => Some(id.to_string()),
            (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }
}

/// Extensions of a Version, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionDataList(Vec<ExtensionDataEntry>);

impl ExtensionDataList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, entry: ExtensionDataEntry) {
        self.0.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtensionDataEntry> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Ids of the component extensions (core extensions have none)
    pub fn extension_ids(&self) -> ComponentIdList {
        self.0
            .iter()
            .filter_map(|e| e.extension_id.clone())
            .collect()
    }

    /// String ids that occur more than once, in order of first repeat
    pub fn duplicate_string_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .filter_map(ExtensionDataEntry::string_id)
            .filter(|id| !seen.insert(id.clone()))
            .collect()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.0.iter().any(|e| e.name.as_deref() == Some(name))
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactFiles> {
        self.0.iter().flat_map(|e| e.artifacts.iter())
    }
}

impl FromIterator<ExtensionDataEntry> for ExtensionDataList {
    fn from_iter<T: IntoIterator<Item = ExtensionDataEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Every path that has a case-insensitive twin in the input
pub(crate) fn duplicates_ignore_case<'a>(paths: impl Iterator<Item = &'a str>) -> Vec<String> {
    let paths: Vec<&str> = paths.collect();
    paths
        .iter()
        .filter(|path| {
            let lower = path.to_lowercase();
            paths.iter().filter(|p| p.to_lowercase() == lower).count() > 1
        })
        .map(|path| path.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    include!("extensions.test.rs");
}
