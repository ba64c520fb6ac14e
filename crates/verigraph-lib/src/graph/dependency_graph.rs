//! Component dependency graph with transitive flattening and cycle detection
//!
//! Nodes are concrete component ids, edges point from a dependent to its
//! dependency and carry the [`EdgeKind`] of the relation. The graph may be
//! cyclic: flattening collapses strongly connected components and reports
//! every cycle as a [`ComponentIssue`] instead of failing.

use super::issues::{ComponentIssue, ComponentIssues, IssueSuppressions, IssuesFound};
use crate::component::{ComponentId, ComponentIdList, Lifecycle};
use petgraph::Direction;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur while building the graph
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DependencyGraphError {
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Component {id} has no concrete version and cannot be a graph node")]
    NotConcrete { id: String },
}

/// Relation between a dependent and its dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Runtime,
    Dev,
    Peer,
    Extension,
}

impl From<Lifecycle> for EdgeKind {
    fn from(lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Runtime => EdgeKind::Runtime,
            Lifecycle::Dev => EdgeKind::Dev,
            Lifecycle::Peer => EdgeKind::Peer,
        }
    }
}

/// A direct dependency as declared by a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectDependency {
    pub id: ComponentId,
    #[serde(default)]
    pub kind: EdgeKind,
}

/// A component and its declared direct dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEdges {
    pub id: ComponentId,
    #[serde(default)]
    pub dependencies: Vec<DirectDependency>,
}

/// Closure of a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedComponent {
    pub id: ComponentId,
    pub direct_dependencies: ComponentIdList,
    pub flattened_dependencies: ComponentIdList,
}

/// Result of flattening the whole graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlattenedGraph {
    /// Sorted by component id
    pub components: Vec<FlattenedComponent>,
    pub issues: ComponentIssues,
}

impl FlattenedGraph {
    pub fn get(&self, id: &ComponentId) -> Option<&FlattenedComponent> {
        self.components
            .binary_search_by(|c| c.id.cmp(id))
            .ok()
            .map(|pos| &self.components[pos])
    }

    /// Keep the result only if every issue is suppressed
    pub fn into_checked(self, suppressions: &IssueSuppressions) -> Result<Self, IssuesFound> {
        self.issues.check(suppressions)?;
        Ok(self)
    }
}

/// Dependency graph for transitive dependency resolution
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Directed graph: nodes = components, edges = dependent -> dependency
    graph: DiGraph<ComponentId, EdgeKind>,
    /// Map from full id string to node index for fast lookup
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build a graph from declared edges. Dependencies that are not declared
    /// as components themselves become leaf nodes.
    pub fn from_edges(components: &[ComponentEdges]) -> Result<Self, DependencyGraphError> {
        let mut graph = Self::new();
        for component in components {
            graph.add_node(component.id.clone())?;
            for dependency in &component.dependencies {
                graph.add_node(dependency.id.clone())?;
            }
        }
        for component in components {
            for dependency in &component.dependencies {
                graph.add_dependency(&component.id, &dependency.id, dependency.kind)?;
            }
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built dependency graph"
        );
        Ok(graph)
    }

    /// Add a component (idempotent)
    pub fn add_node(&mut self, id: ComponentId) -> Result<NodeIndex, DependencyGraphError> {
        let key = id.to_string();
        if let Some(&idx) = self.node_map.get(&key) {
            trace!("Node already exists: {}", key);
            return Ok(idx);
        }
        if !id.version.as_ref().is_some_and(|v| v.is_concrete()) {
            return Err(DependencyGraphError::NotConcrete { id: key });
        }
        let idx = self.graph.add_node(id);
        self.node_map.insert(key, idx);
        Ok(idx)
    }

    /// Add an edge from `dependent` to `dependency`
    pub fn add_dependency(
        &mut self,
        dependent: &ComponentId,
        dependency: &ComponentId,
        kind: EdgeKind,
    ) -> Result<(), DependencyGraphError> {
        let from = self.index_of(dependent)?;
        let to = self.index_of(dependency)?;
        self.graph.add_edge(from, to, kind);
        Ok(())
    }

    fn index_of(&self, id: &ComponentId) -> Result<NodeIndex, DependencyGraphError> {
        let key = id.to_string();
        self.node_map
            .get(&key)
            .copied()
            .ok_or(DependencyGraphError::NodeNotFound { id: key })
    }

    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.node_map.contains_key(&id.to_string())
    }

    /// Sorted, duplicate-free ids of a set of nodes
    fn sorted_ids(&self, nodes: impl IntoIterator<Item = NodeIndex>) -> ComponentIdList {
        let ids: BTreeSet<&ComponentId> = nodes.into_iter().map(|idx| &self.graph[idx]).collect();
        ids.into_iter().cloned().collect()
    }

    fn direct_indices(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .neighbors_directed(node, Direction::Outgoing)
            .filter(move |&n| n != node)
    }

    /// Out-edges of a component, deduplicated, self excluded
    pub fn direct_dependencies(&self, id: &ComponentId) -> Option<ComponentIdList> {
        let idx = self.node_map.get(&id.to_string())?;
        Some(self.sorted_ids(self.direct_indices(*idx)))
    }

    /// Every component reachable from `id`, self excluded, by depth-first walk
    pub fn flatten_component(&self, id: &ComponentId) -> Option<ComponentIdList> {
        let start = *self.node_map.get(&id.to_string())?;
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for neighbor in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        visited.remove(&start);
        Some(self.sorted_ids(visited))
    }

    /// Flatten a subset of components in parallel. Ids absent from the graph
    /// are skipped.
    pub fn flatten_components(&self, ids: &[ComponentId]) -> Vec<FlattenedComponent> {
        ids.par_iter()
            .filter_map(|id| {
                let flattened = self.flatten_component(id)?;
                let direct = self.direct_dependencies(id)?;
                Some(FlattenedComponent {
                    id: id.clone(),
                    direct_dependencies: direct,
                    flattened_dependencies: flattened,
                })
            })
            .collect()
    }

    /// Flatten every component at once.
    ///
    /// Strongly connected components come out of Tarjan in reverse
    /// topological order, so each closure only unions closures computed
    /// before it.
    pub fn flatten(&self) -> FlattenedGraph {
        let sccs = tarjan_scc(&self.graph);
        let mut scc_of = vec![0usize; self.graph.node_count()];
        for (i, scc) in sccs.iter().enumerate() {
            for node in scc {
                scc_of[node.index()] = i;
            }
        }

        let mut closures: Vec<BTreeSet<NodeIndex>> = Vec::with_capacity(sccs.len());
        let mut issues = ComponentIssues::new();

        for (i, scc) in sccs.iter().enumerate() {
            let mut reach = BTreeSet::new();
            if scc.len() > 1 {
                reach.extend(scc.iter().copied());
                issues.push(self.cycle_issue(scc));
            }
            for &node in scc {
                if self.graph.contains_edge(node, node) {
                    issues.push(ComponentIssue::SelfReference {
                        component: self.graph[node].clone(),
                    });
                }
                for neighbor in self.graph.neighbors_directed(node, Direction::Outgoing) {
                    let j = scc_of[neighbor.index()];
                    if j != i {
                        reach.insert(neighbor);
                        reach.extend(closures[j].iter().copied());
                    }
                }
            }
            closures.push(reach);
        }

        let mut components: Vec<FlattenedComponent> = self
            .graph
            .node_indices()
            .map(|node| {
                let closure = &closures[scc_of[node.index()]];
                trace!(component = %self.graph[node], size = closure.len(), "Flattened");
                FlattenedComponent {
                    id: self.graph[node].clone(),
                    direct_dependencies: self.sorted_ids(self.direct_indices(node)),
                    flattened_dependencies: self
                        .sorted_ids(closure.iter().copied().filter(|&n| n != node)),
                }
            })
            .collect();
        components.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(
            components = components.len(),
            issues = issues.len(),
            "Flattened dependency graph"
        );
        FlattenedGraph { components, issues }
    }

    /// Shortest cycle through the smallest member of a strongly connected
    /// component, as a dependent -> dependency path ending at its start
    fn cycle_issue(&self, scc: &[NodeIndex]) -> ComponentIssue {
        let members: HashSet<NodeIndex> = scc.iter().copied().collect();
        let start = scc
            .iter()
            .copied()
            .min_by(|a, b| self.graph[*a].cmp(&self.graph[*b]))
            .unwrap_or(scc[0]);

        let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        let mut closing = None;
        'search: while let Some(node) = queue.pop_front() {
            let mut neighbors: Vec<NodeIndex> = self
                .direct_indices(node)
                .filter(|n| members.contains(n))
                .collect();
            neighbors.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
            neighbors.dedup();
            for neighbor in neighbors {
                if neighbor == start {
                    closing = Some(node);
                    break 'search;
                }
                if !previous.contains_key(&neighbor) {
                    previous.insert(neighbor, node);
                    queue.push_back(neighbor);
                }
            }
        }

        let mut path = vec![start];
        if let Some(mut node) = closing {
            let mut back = Vec::new();
            while node != start {
                back.push(node);
                node = previous[&node];
            }
            path.extend(back.into_iter().rev());
            path.push(start);
        }

        let mut components: Vec<ComponentId> =
            scc.iter().map(|idx| self.graph[*idx].clone()).collect();
        components.sort();
        ComponentIssue::CircularDependencies {
            components,
            cycle: path.into_iter().map(|idx| self.graph[idx].clone()).collect(),
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("dependency_graph.test.rs");
}

#[cfg(test)]
mod cycle_tests {
    include!("cycle_detection.test.rs");
}
