//! Component identifiers and id lists
//!
//! A [`ComponentId`] pairs an optional scope, a name, and an optional
//! [`VersionRef`]. Its string form is `scope/name@version`.

use super::hash::{Ref, is_snap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Marker used in place of a concrete version
pub const LATEST: &str = "latest";

/// Errors raised while parsing component ids
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("Component id is empty")]
    Empty,

    #[error("Component id '{id}' has an empty name")]
    EmptyName { id: String },

    #[error("Component id '{id}' has an empty version")]
    EmptyVersion { id: String },
}

/// Version part of a component id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VersionRef {
    /// Resolve to the newest known version
    Latest,
    /// Human assigned semantic version
    Tag(semver::Version),
    /// Untagged content hash
    Snap(Ref),
    /// Neither a tag nor a snap. Only kept so the validator can reject it.
    Raw(String),
}

impl VersionRef {
    /// Snap or tag, as opposed to the latest marker or garbage
    pub fn is_concrete(&self) -> bool {
        matches!(self, VersionRef::Tag(_) | VersionRef::Snap(_))
    }

    pub fn is_snap(&self) -> bool {
        matches!(self, VersionRef::Snap(_))
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, VersionRef::Latest)
    }

    pub fn as_tag(&self) -> Option<&semver::Version> {
        match self {
            VersionRef::Tag(version) => Some(version),
            _ => None,
        }
    }
}

impl FromStr for VersionRef {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseIdError::EmptyVersion { id: s.to_string() });
        }
        if s == LATEST {
            return Ok(VersionRef::Latest);
        }
        if is_snap(s) {
            return Ok(VersionRef::Snap(Ref::new(s)));
        }
        Ok(match semver::Version::parse(s) {
            Ok(version) => VersionRef::Tag(version),
            Err(_) => VersionRef::Raw(s.to_string()),
        })
    }
}

impl TryFrom<String> for VersionRef {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionRef> for String {
    fn from(value: VersionRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRef::Latest => f.write_str(LATEST),
            VersionRef::Tag(version) => write!(f, "{}", version),
            VersionRef::Snap(hash) => write!(f, "{}", hash),
            VersionRef::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Identity of a component, optionally pinned to a version
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionRef>,
}

impl ComponentId {
    /// Create a scoped id without a version
    pub fn new(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            name: name.into(),
            version: None,
        }
    }

    /// Create an id for a component that was never exported
    pub fn unscoped(name: impl Into<String>) -> Self {
        Self {
            scope: None,
            name: name.into(),
            version: None,
        }
    }

    /// Parse `name@version` keeping the whole path as the name
    pub fn parse_without_scope(s: &str) -> Result<Self, ParseIdError> {
        let (path, version) = split_version(s)?;
        Ok(Self {
            scope: None,
            name: path.to_string(),
            version,
        })
    }

    pub fn with_version(mut self, version: VersionRef) -> Self {
        self.version = Some(version);
        self
    }

    /// Same id pointing at a different version
    pub fn change_version(&self, version: Option<VersionRef>) -> Self {
        Self {
            scope: self.scope.clone(),
            name: self.name.clone(),
            version,
        }
    }

    /// Any version other than the latest marker counts
    pub fn has_version(&self) -> bool {
        self.version.as_ref().is_some_and(|v| !v.is_latest())
    }

    pub fn has_scope(&self) -> bool {
        self.scope.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn is_snap(&self) -> bool {
        self.version.as_ref().is_some_and(VersionRef::is_snap)
    }

    pub fn tag(&self) -> Option<&semver::Version> {
        self.version.as_ref().and_then(VersionRef::as_tag)
    }

    pub fn is_equal_without_version(&self, other: &ComponentId) -> bool {
        self.scope == other.scope && self.name == other.name
    }

    pub fn to_string_without_version(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}/{}", scope, self.name),
            None => self.name.clone(),
        }
    }
}

fn split_version(s: &str) -> Result<(&str, Option<VersionRef>), ParseIdError> {
    if s.is_empty() {
        return Err(ParseIdError::Empty);
    }
    // a leading '@' belongs to the name, never to the version
    let skip = s.chars().next().map_or(0, char::len_utf8);
    let (path, version) = match s[skip..].rfind('@') {
        Some(pos) => {
            let at = pos + skip;
            let version = &s[at + 1..];
            if version.is_empty() {
                return Err(ParseIdError::EmptyVersion { id: s.to_string() });
            }
            (&s[..at], Some(version.parse()?))
        }
        None => (s, None),
    };
    if path.is_empty() || path.ends_with('/') {
        return Err(ParseIdError::EmptyName { id: s.to_string() });
    }
    Ok((path, version))
}

impl FromStr for ComponentId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, version) = split_version(s)?;
        let (scope, name) = match path.split_once('/') {
            Some((scope, name)) if !scope.is_empty() => (Some(scope.to_string()), name.to_string()),
            _ => (None, path.to_string()),
        };
        if name.is_empty() {
            return Err(ParseIdError::EmptyName { id: s.to_string() });
        }
        Ok(Self {
            scope,
            name,
            version,
        })
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_without_version())?;
        if let Some(version) = &self.version {
            write!(f, "@{}", version)?;
        }
        Ok(())
    }
}

/// Ordered list of component ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentIdList(Vec<ComponentId>);

impl ComponentIdList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, id: ComponentId) {
        self.0.push(id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ComponentId] {
        &self.0
    }

    /// Exact membership, version included
    pub fn has(&self, id: &ComponentId) -> bool {
        self.0.contains(id)
    }

    /// Exact lookup returning the stored instance
    pub fn search(&self, id: &ComponentId) -> Option<&ComponentId> {
        self.0.iter().find(|i| *i == id)
    }

    /// Group ids that occur more than once when versions are ignored
    pub fn find_duplications_ignore_version(&self) -> BTreeMap<String, Vec<ComponentId>> {
        let mut groups: BTreeMap<String, Vec<ComponentId>> = BTreeMap::new();
        for id in &self.0 {
            groups
                .entry(id.to_string_without_version())
                .or_default()
                .push(id.clone());
        }
        groups.retain(|_, ids| ids.len() > 1);
        groups
    }
}

impl From<Vec<ComponentId>> for ComponentIdList {
    fn from(ids: Vec<ComponentId>) -> Self {
        Self(ids)
    }
}

impl FromIterator<ComponentId> for ComponentIdList {
    fn from_iter<T: IntoIterator<Item = ComponentId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ComponentIdList {
    type Item = ComponentId;
    type IntoIter = std::vec::IntoIter<ComponentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComponentIdList {
    type Item = &'a ComponentId;
    type IntoIter = std::slice::Iter<'a, ComponentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    include!("id.test.rs");
}
