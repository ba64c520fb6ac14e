// Tests for cycle handling during flattening

use super::*;
use crate::graph::issues::IssueKind;

// ============================================================================
// Test Utilities
// ============================================================================

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

fn ids(list: &ComponentIdList) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn graph_of(edges: &[(&str, &str)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (from, to) in edges {
        graph.add_node(id(from)).unwrap();
        graph.add_node(id(to)).unwrap();
    }
    for (from, to) in edges {
        graph
            .add_dependency(&id(from), &id(to), EdgeKind::Runtime)
            .unwrap();
    }
    graph
}

fn cycles(result: &FlattenedGraph) -> Vec<Vec<String>> {
    result
        .issues
        .iter()
        .filter_map(|issue| match issue {
            ComponentIssue::CircularDependencies { cycle, .. } => {
                Some(cycle.iter().map(ToString::to_string).collect())
            }
            _ => None,
        })
        .collect()
}

// ============================================================================
// Cycle Detection Tests
// ============================================================================

#[test]
fn test_two_node_cycle_flattens_both_ways() {
    let graph = graph_of(&[("s/a@1.0.0", "s/b@1.0.0"), ("s/b@1.0.0", "s/a@1.0.0")]);
    assert!(graph.has_cycles(), "Should detect cycle in A -> B -> A");

    let result = graph.flatten();
    let a = result.get(&id("s/a@1.0.0")).unwrap();
    let b = result.get(&id("s/b@1.0.0")).unwrap();
    assert_eq!(ids(&a.flattened_dependencies), vec!["s/b@1.0.0"]);
    assert_eq!(ids(&b.flattened_dependencies), vec!["s/a@1.0.0"]);

    assert_eq!(
        cycles(&result),
        vec![vec!["s/a@1.0.0", "s/b@1.0.0", "s/a@1.0.0"]]
    );
}

#[test]
fn test_three_node_cycle_path_starts_at_smallest_member() {
    let graph = graph_of(&[
        ("s/b@1.0.0", "s/c@1.0.0"),
        ("s/c@1.0.0", "s/a@1.0.0"),
        ("s/a@1.0.0", "s/b@1.0.0"),
    ]);

    let result = graph.flatten();
    assert_eq!(
        cycles(&result),
        vec![vec!["s/a@1.0.0", "s/b@1.0.0", "s/c@1.0.0", "s/a@1.0.0"]]
    );
    for member in ["s/a@1.0.0", "s/b@1.0.0", "s/c@1.0.0"] {
        let flattened = &result.get(&id(member)).unwrap().flattened_dependencies;
        assert_eq!(flattened.len(), 2, "{} should reach the two others", member);
        assert!(!flattened.has(&id(member)), "{} must not contain itself", member);
    }
}

#[test]
fn test_cycle_between_versions_of_the_same_component() {
    // a1 -> b1 -> b2 -> a1
    let graph = graph_of(&[
        ("s/a@0.0.1", "s/b@0.0.1"),
        ("s/b@0.0.1", "s/b@0.0.2"),
        ("s/b@0.0.2", "s/a@0.0.1"),
    ]);

    let result = graph.flatten();
    assert_eq!(
        cycles(&result),
        vec![vec!["s/a@0.0.1", "s/b@0.0.1", "s/b@0.0.2", "s/a@0.0.1"]]
    );
}

#[test]
fn test_dependent_of_a_cycle_reaches_every_member() {
    let graph = graph_of(&[
        ("s/e@1.0.0", "s/a@1.0.0"),
        ("s/a@1.0.0", "s/b@1.0.0"),
        ("s/b@1.0.0", "s/a@1.0.0"),
        ("s/b@1.0.0", "s/d@1.0.0"),
    ]);

    let result = graph.flatten();
    let e = result.get(&id("s/e@1.0.0")).unwrap();
    assert_eq!(ids(&e.direct_dependencies), vec!["s/a@1.0.0"]);
    assert_eq!(
        ids(&e.flattened_dependencies),
        vec!["s/a@1.0.0", "s/b@1.0.0", "s/d@1.0.0"]
    );

    // only the cycle members carry the issue
    assert_eq!(result.issues.for_component(&id("s/e@1.0.0")).count(), 0);
    assert_eq!(result.issues.for_component(&id("s/a@1.0.0")).count(), 1);
}

#[test]
fn test_self_reference_is_reported_and_excluded() {
    let graph = graph_of(&[("s/a@1.0.0", "s/a@1.0.0"), ("s/a@1.0.0", "s/b@1.0.0")]);

    let result = graph.flatten();
    let a = result.get(&id("s/a@1.0.0")).unwrap();
    assert_eq!(ids(&a.direct_dependencies), vec!["s/b@1.0.0"]);
    assert_eq!(ids(&a.flattened_dependencies), vec!["s/b@1.0.0"]);

    assert_eq!(result.issues.of_kind(IssueKind::SelfReference).count(), 1);
    assert_eq!(
        result.issues.of_kind(IssueKind::CircularDependencies).count(),
        0
    );
}

#[test]
fn test_issues_block_unless_suppressed() {
    let graph = graph_of(&[("s/a@1.0.0", "s/b@1.0.0"), ("s/b@1.0.0", "s/a@1.0.0")]);

    let err = graph
        .flatten()
        .into_checked(&IssueSuppressions::none())
        .unwrap_err();
    assert_eq!(err.issues.len(), 1);

    let suppressions = IssueSuppressions::none().suppress(IssueKind::CircularDependencies);
    let checked = graph.flatten().into_checked(&suppressions).unwrap();
    assert_eq!(checked.components.len(), 2);
}

#[test]
fn test_two_separate_cycles_are_two_issues() {
    let graph = graph_of(&[
        ("s/a@1.0.0", "s/b@1.0.0"),
        ("s/b@1.0.0", "s/a@1.0.0"),
        ("s/c@1.0.0", "s/d@1.0.0"),
        ("s/d@1.0.0", "s/c@1.0.0"),
    ]);
    let mut found = cycles(&graph.flatten());
    found.sort();
    assert_eq!(
        found,
        vec![
            vec!["s/a@1.0.0", "s/b@1.0.0", "s/a@1.0.0"],
            vec!["s/c@1.0.0", "s/d@1.0.0", "s/c@1.0.0"],
        ]
    );
}

#[test]
fn test_long_chain_does_not_overflow() {
    let names: Vec<String> = (0..5000).map(|i| format!("s/n{}@1.0.0", i)).collect();
    let edges: Vec<(&str, &str)> = names
        .windows(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect();
    let graph = graph_of(&edges);

    let first = graph.flatten_component(&id("s/n0@1.0.0")).unwrap();
    assert_eq!(first.len(), 4999);
}
