//! Resolve a versionless component id to its latest known version

use crate::component::{ComponentId, ComponentIdList, VersionRef};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("found multiple snaps for {id}, unable to figure which one is the latest")]
    AmbiguousSnapSet { id: String, snaps: Vec<String> },

    #[error("failed to find the id {id} within the known ids")]
    NotFound { id: String },
}

/// Same component, ignoring version. Scopes only count when both ids
/// carry one: a local reference may predate the export that set it.
fn is_same_component(candidate: &ComponentId, requested: &ComponentId) -> bool {
    if candidate.name != requested.name {
        return false;
    }
    match (&candidate.scope, &requested.scope) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// Find the latest known version of `requested`.
///
/// A request that already names a version is returned unchanged. Only tags
/// are ranked; snaps cannot be ordered, so a component known only by snaps
/// resolves when there is exactly one of them. The request rebuilt with the
/// highest tag is looked up in `candidates`, exactly first and then with the
/// same scope tolerance used for matching.
pub fn resolve_latest(
    candidates: &ComponentIdList,
    requested: &ComponentId,
) -> Result<ComponentId, ResolveError> {
    if requested.has_version() {
        return Ok(requested.clone());
    }

    let similar: Vec<&ComponentId> = candidates
        .iter()
        .filter(|candidate| is_same_component(candidate, requested))
        .collect();
    let tags: Vec<&semver::Version> = similar.iter().filter_map(|id| id.tag()).collect();
    trace!(
        id = %requested,
        matches = similar.len(),
        tags = tags.len(),
        "Resolving latest version"
    );

    let Some(max) = tags.into_iter().max() else {
        return match similar.as_slice() {
            [] => Ok(requested.clone()),
            [only] => Ok((*only).clone()),
            many => Err(ResolveError::AmbiguousSnapSet {
                id: requested.to_string(),
                snaps: many.iter().map(ToString::to_string).collect(),
            }),
        };
    };

    let wanted = requested.change_version(Some(VersionRef::Tag(max.clone())));
    let found = candidates
        .search(&wanted)
        .or_else(|| {
            candidates
                .iter()
                .find(|id| id.tag() == Some(max) && is_same_component(id, &wanted))
        })
        .cloned()
        .ok_or_else(|| ResolveError::NotFound {
            id: wanted.to_string(),
        })?;
    debug!(id = %requested, resolved = %found, "Resolved latest version");
    Ok(found)
}

#[cfg(test)]
mod tests {
    include!("latest.test.rs");
}
