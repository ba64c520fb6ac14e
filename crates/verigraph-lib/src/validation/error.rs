use crate::component::DependencyError;
use std::collections::BTreeMap;
use thiserror::Error;

/// A Version that must not be persisted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct VersionInvalid {
    pub message: String,
}

/// Dependency ids listed more than once (ignoring version) across the
/// runtime, dev and peer categories
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "some dependencies of \"{component}\" are duplicated, see details below.\nif you added a dependency to \"overrides\" configuration with a plus sign, make sure to add it with a minus sign in the other dependency type\nfor example, {{ dependencies: {{ \"bar/foo\": \"+\" }}, devDependencies: {{ \"bar/foo\": \"-\" }} }}\n\n{}",
    render_clashes(.clashes)
)]
pub struct DuplicateDependencies {
    pub component: String,
    /// Id without version -> every occurrence with its version
    pub clashes: BTreeMap<String, Vec<String>>,
}

fn render_clashes(clashes: &BTreeMap<String, Vec<String>>) -> String {
    clashes
        .iter()
        .map(|(id, occurrences)| {
            format!("\"{}\" shows as the following: {}", id, occurrences.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    VersionInvalid(#[from] VersionInvalid),

    #[error(transparent)]
    DuplicateDependencies(#[from] DuplicateDependencies),

    #[error("{context}, {source}")]
    InvalidDependency {
        context: String,
        source: DependencyError,
    },
}
