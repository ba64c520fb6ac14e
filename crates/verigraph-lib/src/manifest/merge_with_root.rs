//! Third dedupe phase
//!
//! Root-level declarations are installed even before any component requires
//! them, so every root entry whose name the deduped root does not know yet is
//! added. Entries computed from components are never overwritten.

use super::{DedupedDependencies, ManifestDependencies};
use crate::component::Lifecycle;
use tracing::trace;

/// Add root entries missing from all three deduped root fields.
///
/// Fields are visited in `dependencies`, `devDependencies`,
/// `peerDependencies` order and the first field declaring a name wins.
pub fn merge_with_root_deps(
    root: &ManifestDependencies,
    mut deduped: DedupedDependencies,
) -> DedupedDependencies {
    for lifecycle in Lifecycle::ALL {
        for (name, range) in root.get(lifecycle) {
            if deduped.root_dependencies.contains(name) {
                continue;
            }
            trace!(package = %name, field = lifecycle.field_name(), "Adding root dependency");
            deduped
                .root_dependencies
                .get_mut(lifecycle)
                .insert(name.clone(), range.clone());
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    include!("merge_with_root.test.rs");
}
