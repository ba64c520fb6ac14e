// Tests for dependency graph construction and flattening

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

fn ids(list: &ComponentIdList) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// Declare a component with runtime dependencies
fn component(owner: &str, deps: &[&str]) -> ComponentEdges {
    ComponentEdges {
        id: id(owner),
        dependencies: deps
            .iter()
            .map(|dep| DirectDependency {
                id: id(dep),
                kind: EdgeKind::Runtime,
            })
            .collect(),
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_add_node_is_idempotent() {
    let mut graph = DependencyGraph::new();
    let first = graph.add_node(id("s/a@1.0.0")).unwrap();
    let second = graph.add_node(id("s/a@1.0.0")).unwrap();
    assert_eq!(first, second);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_add_node_requires_concrete_version() {
    let mut graph = DependencyGraph::new();
    assert_eq!(
        graph.add_node(id("s/a")),
        Err(DependencyGraphError::NotConcrete {
            id: "s/a".to_string()
        })
    );
    assert!(graph.add_node(id("s/a@latest")).is_err());
}

#[test]
fn test_add_dependency_requires_both_nodes() {
    let mut graph = DependencyGraph::new();
    graph.add_node(id("s/a@1.0.0")).unwrap();
    let err = graph
        .add_dependency(&id("s/a@1.0.0"), &id("s/b@1.0.0"), EdgeKind::Runtime)
        .unwrap_err();
    assert_eq!(
        err,
        DependencyGraphError::NodeNotFound {
            id: "s/b@1.0.0".to_string()
        }
    );
}

#[test]
fn test_from_edges_adds_undeclared_dependencies_as_leaves() {
    let graph = DependencyGraph::from_edges(&[component("s/a@1.0.0", &["s/b@1.0.0"])]).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.contains(&id("s/b@1.0.0")));
    assert!(!graph.contains(&id("s/b@2.0.0")));
}

#[test]
fn test_edges_deserialize_with_default_kind() {
    let json = serde_json::json!([
        {
            "id": {"scope": "s", "name": "a", "version": "1.0.0"},
            "dependencies": [
                {"id": {"scope": "s", "name": "b", "version": "1.0.0"}},
                {"id": {"scope": "s", "name": "env", "version": "1.0.0"}, "kind": "extension"}
            ]
        }
    ]);
    let edges: Vec<ComponentEdges> = serde_json::from_value(json).unwrap();
    assert_eq!(edges[0].dependencies[0].kind, EdgeKind::Runtime);
    assert_eq!(edges[0].dependencies[1].kind, EdgeKind::Extension);
}

// ============================================================================
// Direct dependencies
// ============================================================================

#[test]
fn test_direct_dependencies_are_deduplicated() {
    let mut graph = DependencyGraph::new();
    let a = id("s/a@1.0.0");
    let b = id("s/b@1.0.0");
    graph.add_node(a.clone()).unwrap();
    graph.add_node(b.clone()).unwrap();
    graph.add_dependency(&a, &b, EdgeKind::Runtime).unwrap();
    graph.add_dependency(&a, &b, EdgeKind::Extension).unwrap();

    assert_eq!(ids(&graph.direct_dependencies(&a).unwrap()), vec!["s/b@1.0.0"]);
    assert!(graph.direct_dependencies(&id("s/z@1.0.0")).is_none());
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn test_flatten_chain() {
    let graph = DependencyGraph::from_edges(&[
        component("s/a@1.0.0", &["s/b@1.0.0"]),
        component("s/b@1.0.0", &["s/c@1.0.0"]),
        component("s/c@1.0.0", &[]),
    ])
    .unwrap();

    let result = graph.flatten();
    assert!(result.issues.is_empty());
    assert!(!graph.has_cycles());

    let a = result.get(&id("s/a@1.0.0")).unwrap();
    assert_eq!(ids(&a.direct_dependencies), vec!["s/b@1.0.0"]);
    assert_eq!(ids(&a.flattened_dependencies), vec!["s/b@1.0.0", "s/c@1.0.0"]);

    let c = result.get(&id("s/c@1.0.0")).unwrap();
    assert!(c.flattened_dependencies.is_empty());
}

#[test]
fn test_flatten_diamond_has_no_duplicates() {
    let graph = DependencyGraph::from_edges(&[
        component("s/a@1.0.0", &["s/b@1.0.0", "s/c@1.0.0"]),
        component("s/b@1.0.0", &["s/d@1.0.0"]),
        component("s/c@1.0.0", &["s/d@1.0.0"]),
    ])
    .unwrap();

    let result = graph.flatten();
    let a = result.get(&id("s/a@1.0.0")).unwrap();
    assert_eq!(
        ids(&a.flattened_dependencies),
        vec!["s/b@1.0.0", "s/c@1.0.0", "s/d@1.0.0"]
    );
}

#[test]
fn test_flatten_keeps_versions_distinct() {
    let graph = DependencyGraph::from_edges(&[
        component("s/a@1.0.0", &["s/c@1.0.0"]),
        component("s/b@1.0.0", &["s/c@2.0.0"]),
    ])
    .unwrap();

    let result = graph.flatten();
    assert_eq!(result.components.len(), 4);
    assert_eq!(
        ids(&result.get(&id("s/b@1.0.0")).unwrap().flattened_dependencies),
        vec!["s/c@2.0.0"]
    );
}

#[test]
fn test_full_flatten_matches_per_component_walk() {
    let graph = DependencyGraph::from_edges(&[
        component("s/a@1.0.0", &["s/b@1.0.0"]),
        component("s/b@1.0.0", &["s/c@1.0.0", "s/a@1.0.0"]),
        component("s/c@1.0.0", &["s/d@1.0.0"]),
        component("s/e@1.0.0", &["s/a@1.0.0"]),
    ])
    .unwrap();

    let full = graph.flatten();
    let all: Vec<ComponentId> = full.components.iter().map(|c| c.id.clone()).collect();
    let subset = graph.flatten_components(&all);
    assert_eq!(subset.len(), all.len());

    for component in subset {
        let expected = full.get(&component.id).unwrap();
        assert_eq!(component, *expected, "mismatch for {}", component.id);
    }
}

#[test]
fn test_flatten_components_skips_unknown_ids() {
    let graph = DependencyGraph::from_edges(&[component("s/a@1.0.0", &[])]).unwrap();
    let result = graph.flatten_components(&[id("s/a@1.0.0"), id("s/missing@1.0.0")]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, id("s/a@1.0.0"));
}

#[test]
fn test_flatten_results_are_sorted() {
    let graph = DependencyGraph::from_edges(&[
        component("s/z@1.0.0", &["s/y@1.0.0"]),
        component("s/m@1.0.0", &[]),
    ])
    .unwrap();
    let names: Vec<String> = graph
        .flatten()
        .components
        .iter()
        .map(|c| c.id.name.clone())
        .collect();
    assert_eq!(names, vec!["m", "y", "z"]);
}
