//! Component issues raised while flattening
//!
//! Issues never abort flattening. The caller decides which kinds may pass
//! through an explicit [`IssueSuppressions`] set.

use crate::component::ComponentId;
use crate::primitives::impl_fromstr_for_value_enum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Kinds of issues the flattener can raise
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum IssueKind {
    /// Components that (transitively) depend on each other
    #[value(alias = "CircularDependencies")]
    CircularDependencies,
    /// A component listing itself as a dependency
    #[value(alias = "SelfReference")]
    SelfReference,
}

impl_fromstr_for_value_enum!(IssueKind, "invalid issue kind");

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::CircularDependencies => f.write_str("CircularDependencies"),
            IssueKind::SelfReference => f.write_str("SelfReference"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ComponentIssue {
    /// Every member of one strongly connected component, with one cycle
    /// through them as a dependent -> dependency path ending at its start
    CircularDependencies {
        components: Vec<ComponentId>,
        cycle: Vec<ComponentId>,
    },
    SelfReference { component: ComponentId },
}

impl ComponentIssue {
    pub fn kind(&self) -> IssueKind {
        match self {
            ComponentIssue::CircularDependencies { .. } => IssueKind::CircularDependencies,
            ComponentIssue::SelfReference { .. } => IssueKind::SelfReference,
        }
    }

    pub fn affects(&self, id: &ComponentId) -> bool {
        match self {
            ComponentIssue::CircularDependencies { components, .. } => components.contains(id),
            ComponentIssue::SelfReference { component } => component == id,
        }
    }
}

impl fmt::Display for ComponentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentIssue::CircularDependencies { cycle, .. } => {
                let path: Vec<String> = cycle.iter().map(ToString::to_string).collect();
                write!(f, "circular dependencies: {}", path.join(" -> "))
            }
            ComponentIssue::SelfReference { component } => {
                write!(f, "{} depends on itself", component)
            }
        }
    }
}

/// Issue kinds the caller accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSuppressions(BTreeSet<IssueKind>);

impl IssueSuppressions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn suppress(mut self, kind: IssueKind) -> Self {
        self.0.insert(kind);
        self
    }

    pub fn suppresses(&self, kind: IssueKind) -> bool {
        self.0.contains(&kind)
    }
}

impl FromIterator<IssueKind> for IssueSuppressions {
    fn from_iter<T: IntoIterator<Item = IssueKind>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Unsuppressed issues that block the operation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("issues found: {}", render_issues(.issues))]
pub struct IssuesFound {
    pub issues: Vec<ComponentIssue>,
}

fn render_issues(issues: &[ComponentIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every issue found in one flattening run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentIssues(Vec<ComponentIssue>);

impl ComponentIssues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ComponentIssue) {
        self.0.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentIssue> {
        self.0.iter()
    }

    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &ComponentIssue> {
        self.0.iter().filter(move |issue| issue.kind() == kind)
    }

    pub fn for_component<'a>(
        &'a self,
        id: &'a ComponentId,
    ) -> impl Iterator<Item = &'a ComponentIssue> + 'a {
        self.0.iter().filter(move |issue| issue.affects(id))
    }

    /// Fail with every issue whose kind is not suppressed
    pub fn check(&self, suppressions: &IssueSuppressions) -> Result<(), IssuesFound> {
        let blocking: Vec<ComponentIssue> = self
            .0
            .iter()
            .filter(|issue| !suppressions.suppresses(issue.kind()))
            .cloned()
            .collect();
        if blocking.is_empty() {
            Ok(())
        } else {
            Err(IssuesFound { issues: blocking })
        }
    }
}

#[cfg(test)]
mod tests {
    include!("issues.test.rs");
}
