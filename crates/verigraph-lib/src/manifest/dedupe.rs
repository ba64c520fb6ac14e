//! First and second dedupe phases
//!
//! Phase 1 flattens each component manifest into one usage per package
//! name. Phase 2 groups usages by name across components and hoists a single
//! version to the root manifest; components whose range that version does not
//! satisfy keep their own request.

use super::{DedupedDependencies, ManifestDependencies};
use crate::component::{ComponentId, Lifecycle};
use semver::{BuildMetadata, Comparator, Op, Prerelease, Version as SemVer, VersionReq};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Category priority when a name is requested in several fields
const CATEGORY_PRIORITY: [Lifecycle; 3] = [Lifecycle::Runtime, Lifecycle::Peer, Lifecycle::Dev];

/// The manifest requested by one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentManifest {
    pub id: ComponentId,
    #[serde(flatten)]
    pub manifest: ManifestDependencies,
}

/// One component's request for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUsage {
    pub component: String,
    pub name: String,
    pub range: String,
    pub lifecycle: Lifecycle,
}

/// Phase 1: one usage per package name, the highest priority category wins
pub fn component_usages(component: &ComponentManifest) -> Vec<PackageUsage> {
    let owner = component.id.to_string();
    let mut usages: BTreeMap<&str, PackageUsage> = BTreeMap::new();
    for lifecycle in CATEGORY_PRIORITY {
        for (name, range) in component.manifest.get(lifecycle) {
            usages.entry(name.as_str()).or_insert_with(|| PackageUsage {
                component: owner.clone(),
                name: name.clone(),
                range: range.clone(),
                lifecycle,
            });
        }
    }
    usages.into_values().collect()
}

/// Translate an npm range into the comma separated form `semver` parses.
///
/// Returns `None` for ranges that are not plain semver: URLs, git specs,
/// dist-tags, hyphen ranges and `||` unions.
pub fn normalize_range(range: &str) -> Option<VersionReq> {
    let range = range.trim();
    if range.is_empty() || range.contains("||") || range.contains(" - ") {
        return None;
    }

    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in range.split_whitespace() {
        if token.chars().all(|c| "<>=~^".contains(c)) {
            pending_op = Some(token);
            continue;
        }
        let token = match pending_op.take() {
            Some(op) => format!("{}{}", op, token),
            // npm reads a bare full version as an exact match
            None if SemVer::parse(token).is_ok() => format!("={}", token),
            // and a bare partial one as an x-range: `1.2` is `1.2.x`
            None if is_partial_version(token) => format!("~{}", token),
            None => token.to_string(),
        };
        comparators.push(token);
    }
    if pending_op.is_some() {
        return None;
    }
    VersionReq::parse(&comparators.join(", ")).ok()
}

/// `1` or `1.2`: numeric, without patch or wildcard
fn is_partial_version(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() < 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Lowest version a comparator admits, `None` for upper bounds
fn lower_bound(c: &Comparator) -> Option<SemVer> {
    let floor = |pre: Prerelease| SemVer {
        major: c.major,
        minor: c.minor.unwrap_or(0),
        patch: c.patch.unwrap_or(0),
        pre,
        build: BuildMetadata::EMPTY,
    };
    match c.op {
        Op::Greater => Some(match (c.minor, c.patch) {
            // a release is above every pre-release of it
            (Some(_), Some(_)) if !c.pre.is_empty() => floor(Prerelease::EMPTY),
            (Some(minor), Some(patch)) => SemVer::new(c.major, minor, patch + 1),
            (Some(minor), None) => SemVer::new(c.major, minor + 1, 0),
            (None, _) => SemVer::new(c.major + 1, 0, 0),
        }),
        Op::LessEq if c.minor.is_some() && c.patch.is_some() => Some(floor(c.pre.clone())),
        Op::Less | Op::LessEq => None,
        _ => Some(floor(c.pre.clone())),
    }
}

/// Versions worth trying: every lower bound, plus `0.0.0` for ranges
/// bounded from above only
fn candidate_versions(reqs: &[VersionReq]) -> Vec<SemVer> {
    let mut candidates: Vec<SemVer> = reqs
        .iter()
        .flat_map(|req| req.comparators.iter())
        .filter_map(lower_bound)
        .collect();
    candidates.push(SemVer::new(0, 0, 0));
    candidates.sort();
    candidates.dedup();
    candidates
}

/// Root field a hoisted package lands in
fn root_lifecycle(usages: &[PackageUsage]) -> Lifecycle {
    if usages.iter().all(|u| u.lifecycle == Lifecycle::Peer) {
        Lifecycle::Peer
    } else if usages.iter().any(|u| u.lifecycle == Lifecycle::Runtime) {
        Lifecycle::Runtime
    } else {
        Lifecycle::Dev
    }
}

/// Outcome of hoisting one package name
#[derive(Debug, Clone, PartialEq, Eq)]
enum Hoist {
    /// Every usage takes the root entry
    All(String),
    /// The root entry plus the usages (by index) it does not satisfy
    Partial(String, Vec<usize>),
    /// Nothing can be shared
    None,
}

fn hoist(usages: &[PackageUsage]) -> Hoist {
    let first = &usages[0].range;
    if usages.iter().all(|u| &u.range == first) {
        return Hoist::All(first.clone());
    }

    let Some(reqs) = usages
        .iter()
        .map(|u| normalize_range(&u.range))
        .collect::<Option<Vec<_>>>()
    else {
        return Hoist::None;
    };

    let best = candidate_versions(&reqs)
        .into_iter()
        .map(|candidate| {
            let satisfied = reqs.iter().filter(|req| req.matches(&candidate)).count();
            (satisfied, candidate)
        })
        .max();

    match best {
        Some((satisfied, version)) if satisfied == reqs.len() => Hoist::All(version.to_string()),
        Some((satisfied, version)) if satisfied > 0 => {
            let unmatched = reqs
                .iter()
                .enumerate()
                .filter(|(_, req)| !req.matches(&version))
                .map(|(i, _)| i)
                .collect();
            Hoist::Partial(version.to_string(), unmatched)
        }
        _ => Hoist::None,
    }
}

/// Phases 1 and 2 over every component manifest
pub fn dedupe_dependencies(components: &[ComponentManifest]) -> DedupedDependencies {
    let mut by_name: BTreeMap<String, Vec<PackageUsage>> = BTreeMap::new();
    for component in components {
        for usage in component_usages(component) {
            by_name.entry(usage.name.clone()).or_default().push(usage);
        }
    }

    let mut deduped = DedupedDependencies::default();
    for (name, usages) in &by_name {
        let keep_own = |deduped: &mut DedupedDependencies, usage: &PackageUsage| {
            deduped
                .component_dependencies_map
                .entry(usage.component.clone())
                .or_default()
                .get_mut(usage.lifecycle)
                .insert(usage.name.clone(), usage.range.clone());
        };

        let root = root_lifecycle(usages);
        match hoist(usages) {
            Hoist::All(range) => {
                trace!(package = %name, range = %range, "Hoisted");
                deduped.root_dependencies.get_mut(root).insert(name.clone(), range);
            }
            Hoist::Partial(range, unmatched) => {
                trace!(package = %name, range = %range, kept = unmatched.len(), "Partially hoisted");
                deduped.root_dependencies.get_mut(root).insert(name.clone(), range);
                for i in unmatched {
                    keep_own(&mut deduped, &usages[i]);
                }
            }
            Hoist::None => {
                trace!(package = %name, "Not hoisted");
                for usage in usages {
                    keep_own(&mut deduped, usage);
                }
            }
        }
    }

    debug!(
        components = components.len(),
        packages = by_name.len(),
        "Deduped dependencies"
    );
    deduped
}

#[cfg(test)]
mod tests {
    include!("dedupe.test.rs");
}
