//! # Tagging
//!
//! Turns a batch of modified components into validated Version objects.
//!
//! The batch is bumped first so siblings point at each other's new version,
//! remaining versionless references are resolved to the latest known
//! version, the resulting graph is flattened and every Version is validated
//! under its new id before it is returned.

use crate::component::{
    ComponentId, ComponentIdList, Dependency, DependencyList, ExtensionDataEntry,
    ExtensionDataList, Lifecycle, Log, PackageDependencies, Ref, SchemaName, SourceFile, Version,
    VersionRef,
};
use crate::graph::{
    ComponentEdges, DependencyGraph, DependencyGraphError, DirectDependency, EdgeKind,
    FlattenedGraph, IssueSuppressions, IssuesFound,
};
use crate::manifest::{ComponentManifest, ManifestDependencies};
use crate::resolver::{ResolveError, resolve_latest};
use crate::validation::{ValidationError, validate};
use semver::Version as SemVer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

/// Producer version recorded on every Version written by this crate
pub const PRODUCER_VERSION: SemVer = SemVer::new(1, 0, 0);

#[derive(Debug, Error)]
pub enum TagError {
    #[error("component {id} appears more than once in the tag request")]
    DuplicateComponent { id: String },

    #[error("unable to tag {id}: {version} is neither a tag nor a snap")]
    NotConcrete { id: String, version: String },

    #[error("unable to resolve {dependency} required by {component}")]
    Resolve {
        component: String,
        dependency: String,
        #[source]
        source: ResolveError,
    },

    #[error("{component} depends on {dependency} which has no known version")]
    Unversioned {
        component: String,
        dependency: String,
    },

    #[error(transparent)]
    Graph(#[from] DependencyGraphError),

    #[error(transparent)]
    Issues(#[from] IssuesFound),

    #[error("{source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// File content as handed over by the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagFile {
    pub relative_path: String,
    pub content: String,
}

/// One modified component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentToTag {
    /// Scope and name; any version on it is ignored
    pub id: ComponentId,
    pub version: Option<VersionRef>,
    pub main_file: String,
    pub files: Vec<TagFile>,
    #[serde(default)]
    pub dependencies: Vec<ComponentId>,
    #[serde(default)]
    pub dev_dependencies: Vec<ComponentId>,
    #[serde(default)]
    pub peer_dependencies: Vec<ComponentId>,
    #[serde(default)]
    pub extensions: Vec<ComponentId>,
    #[serde(default)]
    pub package_dependencies: PackageDependencies,
    #[serde(default)]
    pub dev_package_dependencies: PackageDependencies,
    #[serde(default)]
    pub peer_package_dependencies: PackageDependencies,
    #[serde(default)]
    pub previous_head: Option<Ref>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ComponentToTag {
    fn component_deps(&self, lifecycle: Lifecycle) -> &[ComponentId] {
        match lifecycle {
            Lifecycle::Runtime => &self.dependencies,
            Lifecycle::Dev => &self.dev_dependencies,
            Lifecycle::Peer => &self.peer_dependencies,
        }
    }

    fn package_deps(&self, lifecycle: Lifecycle) -> &PackageDependencies {
        match lifecycle {
            Lifecycle::Runtime => &self.package_dependencies,
            Lifecycle::Dev => &self.dev_package_dependencies,
            Lifecycle::Peer => &self.peer_package_dependencies,
        }
    }
}

/// A batch of components tagged together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagRequest {
    pub components: Vec<ComponentToTag>,
    /// Versions already in history, used for latest resolution
    pub known_versions: ComponentIdList,
    /// Edges of components already in history, so flattening can walk
    /// through them
    pub known_edges: Vec<ComponentEdges>,
    /// Fallback log message for components without their own
    pub message: String,
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedComponent {
    pub id: ComponentId,
    pub hash: Ref,
    pub version: Version,
}

impl TaggedComponent {
    /// Installable requests of the new Version, ready for deduping
    pub fn manifest(&self) -> ComponentManifest {
        ComponentManifest {
            id: self.id.clone(),
            manifest: ManifestDependencies::from_version(&self.version),
        }
    }
}

/// A batch component with every reference resolved
struct Resolved<'a> {
    source: &'a ComponentToTag,
    id: ComponentId,
    dependencies: [Vec<ComponentId>; 3],
    extensions: Vec<ComponentId>,
}

impl Resolved<'_> {
    fn edges(&self) -> ComponentEdges {
        let mut dependencies = Vec::new();
        for (lifecycle, ids) in Lifecycle::ALL.iter().zip(&self.dependencies) {
            dependencies.extend(ids.iter().map(|id| DirectDependency {
                id: id.clone(),
                kind: EdgeKind::from(*lifecycle),
            }));
        }
        dependencies.extend(self.extensions.iter().map(|id| DirectDependency {
            id: id.clone(),
            kind: EdgeKind::Extension,
        }));
        ComponentEdges {
            id: self.id.clone(),
            dependencies,
        }
    }
}

/// Tag every component of `request`.
///
/// Nothing is returned unless every component produces a valid Version.
pub fn tag_components(
    request: &TagRequest,
    suppressions: &IssueSuppressions,
) -> Result<Vec<TaggedComponent>, TagError> {
    let batch = bump_batch(&request.components)?;
    debug!(components = batch.len(), "Tagging components");

    let resolved = request
        .components
        .iter()
        .zip(batch.iter())
        .map(|(component, id)| resolve_references(request, &batch, component, id))
        .collect::<Result<Vec<_>, _>>()?;

    let mut edges: Vec<ComponentEdges> = request.known_edges.clone();
    edges.extend(resolved.iter().map(Resolved::edges));
    let flattened = DependencyGraph::from_edges(&edges)?
        .flatten()
        .into_checked(suppressions)?;

    resolved
        .iter()
        .map(|component| build_version(request, &flattened, component))
        .collect()
}

/// New ids of the batch, in request order
fn bump_batch(components: &[ComponentToTag]) -> Result<Vec<ComponentId>, TagError> {
    let mut seen = HashSet::new();
    let mut batch = Vec::with_capacity(components.len());
    for component in components {
        let key = component.id.to_string_without_version();
        if !seen.insert(key.clone()) {
            return Err(TagError::DuplicateComponent { id: key });
        }
        let version = component.version.clone().unwrap_or(VersionRef::Latest);
        if !version.is_concrete() {
            return Err(TagError::NotConcrete {
                id: key,
                version: version.to_string(),
            });
        }
        batch.push(component.id.change_version(Some(version)));
    }
    Ok(batch)
}

/// Point a reference at a sibling's new version, or at the latest known one
fn resolve_reference(
    request: &TagRequest,
    batch: &[ComponentId],
    owner: &ComponentId,
    reference: &ComponentId,
) -> Result<ComponentId, TagError> {
    if let Some(sibling) = batch.iter().find(|id| id.is_equal_without_version(reference)) {
        trace!(component = %owner, dependency = %sibling, "Using new version of sibling");
        return Ok(sibling.clone());
    }
    let found = resolve_latest(&request.known_versions, reference).map_err(|source| {
        TagError::Resolve {
            component: owner.to_string(),
            dependency: reference.to_string(),
            source,
        }
    })?;
    if !found.has_version() {
        return Err(TagError::Unversioned {
            component: owner.to_string(),
            dependency: reference.to_string(),
        });
    }
    Ok(found)
}

fn resolve_references<'a>(
    request: &TagRequest,
    batch: &[ComponentId],
    component: &'a ComponentToTag,
    id: &ComponentId,
) -> Result<Resolved<'a>, TagError> {
    let resolve_all = |references: &[ComponentId]| {
        references
            .iter()
            .map(|reference| resolve_reference(request, batch, id, reference))
            .collect::<Result<Vec<_>, _>>()
    };
    Ok(Resolved {
        source: component,
        id: id.clone(),
        dependencies: [
            resolve_all(component.component_deps(Lifecycle::Runtime))?,
            resolve_all(component.component_deps(Lifecycle::Dev))?,
            resolve_all(component.component_deps(Lifecycle::Peer))?,
        ],
        extensions: resolve_all(&component.extensions)?,
    })
}

fn build_version(
    request: &TagRequest,
    flattened: &FlattenedGraph,
    component: &Resolved<'_>,
) -> Result<TaggedComponent, TagError> {
    let source = component.source;
    // a reference to the component itself is an issue of the graph, never
    // a persisted dependency
    let dependency_list = |lifecycle: Lifecycle| -> DependencyList {
        component.dependencies[lifecycle_index(lifecycle)]
            .iter()
            .filter(|id| !id.is_equal_without_version(&component.id))
            .cloned()
            .map(Dependency::new)
            .collect()
    };

    let version = Version {
        main_file: source.main_file.clone(),
        files: source
            .files
            .iter()
            .map(|file| SourceFile::from_content(&file.relative_path, file.content.as_bytes()))
            .collect(),
        dependencies: dependency_list(Lifecycle::Runtime),
        dev_dependencies: dependency_list(Lifecycle::Dev),
        peer_dependencies: dependency_list(Lifecycle::Peer),
        package_dependencies: source.package_deps(Lifecycle::Runtime).clone(),
        dev_package_dependencies: source.package_deps(Lifecycle::Dev).clone(),
        peer_package_dependencies: source.package_deps(Lifecycle::Peer).clone(),
        flattened_dependencies: flattened
            .get(&component.id)
            .map(|c| c.flattened_dependencies.clone())
            .unwrap_or_default(),
        extensions: component
            .extensions
            .iter()
            .cloned()
            .map(ExtensionDataEntry::from_id)
            .collect::<ExtensionDataList>(),
        parents: source.previous_head.iter().cloned().collect(),
        log: Some(Log {
            message: source
                .message
                .clone()
                .unwrap_or_else(|| request.message.clone()),
            username: request.username.clone(),
            email: request.email.clone(),
            date: None,
        }),
        schema: Some(SchemaName::Harmony),
        producer_version: Some(PRODUCER_VERSION),
        ..Default::default()
    };

    validate(&version, Some(&component.id)).map_err(|source| TagError::Invalid {
        id: component.id.to_string(),
        source,
    })?;

    let hash = version.hash();
    debug!(id = %component.id, hash = %hash, "Tagged component");
    Ok(TaggedComponent {
        id: component.id.clone(),
        hash,
        version,
    })
}

fn lifecycle_index(lifecycle: Lifecycle) -> usize {
    match lifecycle {
        Lifecycle::Runtime => 0,
        Lifecycle::Dev => 1,
        Lifecycle::Peer => 2,
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
