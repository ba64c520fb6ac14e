//! # Graph Module
//!
//! Flattening of the component dependency graph.
//!
//! ## Modules
//!
//! - [`dependency_graph`] - Transitive closures over a possibly cyclic graph
//! - [`issues`] - Issues raised while flattening and their suppression

pub mod dependency_graph;
pub mod issues;

pub use dependency_graph::{
    ComponentEdges, DependencyGraph, DependencyGraphError, DirectDependency, EdgeKind,
    FlattenedComponent, FlattenedGraph,
};
pub use issues::{ComponentIssue, ComponentIssues, IssueKind, IssueSuppressions, IssuesFound};
