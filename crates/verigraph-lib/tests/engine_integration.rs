//! Validation, flattening and deduping working on the same components

use verigraph_lib::component::{ComponentId, Dependency, Log, SchemaName, SourceFile, Version};
use verigraph_lib::graph::{ComponentEdges, DependencyGraph, DirectDependency, EdgeKind};
use verigraph_lib::manifest::{
    ComponentManifest, ManifestDependencies, dedupe_dependencies, merge_with_root_deps,
};
use verigraph_lib::validation::{ValidationError, validate};

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

fn edges(component: &str, dependencies: &[&str]) -> ComponentEdges {
    ComponentEdges {
        id: id(component),
        dependencies: dependencies
            .iter()
            .map(|dep| DirectDependency {
                id: id(dep),
                kind: EdgeKind::Runtime,
            })
            .collect(),
    }
}

fn version_with(dependencies: &[&str]) -> Version {
    Version {
        main_file: "index.ts".to_string(),
        files: vec![SourceFile::from_content("index.ts", b"export {};")],
        dependencies: dependencies.iter().map(|dep| Dependency::new(id(dep))).collect(),
        log: Some(Log {
            message: "tag".to_string(),
            ..Default::default()
        }),
        schema: Some(SchemaName::Harmony),
        ..Default::default()
    }
}

#[test]
fn test_flattened_output_makes_a_version_valid() {
    let graph = DependencyGraph::from_edges(&[
        edges("s/app@1.0.0", &["s/ui@2.0.0"]),
        edges("s/ui@2.0.0", &["s/theme@1.1.0"]),
    ])
    .unwrap();
    let flattened = graph.flatten();
    assert!(flattened.issues.is_empty());

    let owner = id("s/app@1.0.0");
    let mut version = version_with(&["s/ui@2.0.0"]);
    let err = validate(&version, Some(&owner)).unwrap_err();
    assert!(matches!(err, ValidationError::VersionInvalid(_)));

    version.flattened_dependencies = flattened.get(&owner).unwrap().flattened_dependencies.clone();
    assert_eq!(version.flattened_dependencies.len(), 2);
    validate(&version, Some(&owner)).unwrap();
}

#[test]
fn test_subset_flattening_matches_full_flattening() {
    let graph = DependencyGraph::from_edges(&[
        edges("s/a@1.0.0", &["s/b@1.0.0", "s/c@1.0.0"]),
        edges("s/b@1.0.0", &["s/d@1.0.0"]),
        edges("s/c@1.0.0", &["s/d@1.0.0"]),
        edges("s/d@1.0.0", &["s/b@1.0.0"]),
    ])
    .unwrap();
    let full = graph.flatten();
    let subset = graph.flatten_components(&[id("s/a@1.0.0"), id("s/c@1.0.0")]);
    for component in subset {
        assert_eq!(
            component.flattened_dependencies,
            full.get(&component.id).unwrap().flattened_dependencies
        );
    }
}

#[test]
fn test_dedupe_then_merge_with_root() {
    let manifest = |component: &str, deps: &[(&str, &str)]| ComponentManifest {
        id: id(component),
        manifest: ManifestDependencies {
            dependencies: deps
                .iter()
                .map(|(n, r)| (n.to_string(), r.to_string()))
                .collect(),
            ..Default::default()
        },
    };
    let deduped = dedupe_dependencies(&[
        manifest("s/a@1.0.0", &[("react", "^18.0.0"), ("lodash", "4.17.21")]),
        manifest("s/b@1.0.0", &[("react", "^18.2.0")]),
    ]);
    let root = ManifestDependencies {
        dependencies: [("react".to_string(), "^17.0.0".to_string())].into(),
        dev_dependencies: [("typescript".to_string(), "^5.0.0".to_string())].into(),
        ..Default::default()
    };
    let merged = merge_with_root_deps(&root, deduped.clone());

    assert_eq!(
        merged.root_dependencies.dependencies["react"],
        deduped.root_dependencies.dependencies["react"]
    );
    assert_eq!(merged.root_dependencies.dev_dependencies["typescript"], "^5.0.0");
    assert_eq!(merge_with_root_deps(&root, merged.clone()), merged);
}
