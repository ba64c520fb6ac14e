use super::*;
use crate::graph::IssueKind;

const PREVIOUS_HEAD: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

fn component(name: &str, version: &str) -> ComponentToTag {
    ComponentToTag {
        id: id(name),
        version: Some(version.parse().unwrap()),
        main_file: "index.ts".to_string(),
        files: vec![TagFile {
            relative_path: "index.ts".to_string(),
            content: format!("export const name = '{}';", name),
        }],
        dependencies: Vec::new(),
        dev_dependencies: Vec::new(),
        peer_dependencies: Vec::new(),
        extensions: Vec::new(),
        package_dependencies: PackageDependencies::new(),
        dev_package_dependencies: PackageDependencies::new(),
        peer_package_dependencies: PackageDependencies::new(),
        previous_head: None,
        message: None,
    }
}

fn request(components: Vec<ComponentToTag>) -> TagRequest {
    TagRequest {
        components,
        message: "tag".to_string(),
        ..Default::default()
    }
}

fn tagged<'a>(result: &'a [TaggedComponent], name: &str) -> &'a TaggedComponent {
    result
        .iter()
        .find(|c| c.id.to_string_without_version() == name)
        .unwrap()
}

// ============================================================================
// Cyclic batches
// ============================================================================

#[test]
fn test_cyclic_pair_tags_when_cycles_are_suppressed() {
    let mut a = component("s/a", "0.0.1");
    a.dependencies.push(id("s/b"));
    let mut b = component("s/b", "0.0.1");
    b.dependencies.push(id("s/a"));

    let suppressions = IssueSuppressions::none().suppress(IssueKind::CircularDependencies);
    let result = tag_components(&request(vec![a, b]), &suppressions).unwrap();
    assert_eq!(result.len(), 2);

    let a = tagged(&result, "s/a");
    assert_eq!(a.id.to_string(), "s/a@0.0.1");
    assert_eq!(a.version.dependencies.get()[0].id.to_string(), "s/b@0.0.1");
    assert!(a.version.flattened_dependencies.has(&id("s/b@0.0.1")));
    assert!(!a.version.flattened_dependencies.has(&id("s/a@0.0.1")));

    let b = tagged(&result, "s/b");
    assert!(b.version.flattened_dependencies.has(&id("s/a@0.0.1")));
    assert_eq!(a.hash, a.version.hash());
    assert_ne!(a.hash, b.hash);
}

#[test]
fn test_cyclic_pair_is_rejected_without_suppression() {
    let mut a = component("s/a", "0.0.1");
    a.dependencies.push(id("s/b"));
    let mut b = component("s/b", "0.0.1");
    b.dependencies.push(id("s/a"));

    let err = tag_components(&request(vec![a, b]), &IssueSuppressions::none()).unwrap_err();
    match err {
        TagError::Issues(found) => {
            assert_eq!(found.issues.len(), 1);
            assert_eq!(found.issues[0].kind(), IssueKind::CircularDependencies);
        }
        other => panic!("expected issues, got {:?}", other),
    }
}

#[test]
fn test_suppressed_self_reference_is_dropped_from_dependencies() {
    let mut a = component("s/a", "0.0.1");
    a.dependencies.push(id("s/a"));
    a.dependencies.push(id("s/b"));
    let b = component("s/b", "0.0.1");

    let suppressions = IssueSuppressions::none().suppress(IssueKind::SelfReference);
    let result = tag_components(&request(vec![a, b]), &suppressions).unwrap();
    let a = tagged(&result, "s/a");
    let deps: Vec<String> = a
        .version
        .dependencies
        .get()
        .iter()
        .map(|d| d.id.to_string())
        .collect();
    assert_eq!(deps, vec!["s/b@0.0.1".to_string()]);
    assert!(!a.version.flattened_dependencies.has(&id("s/a@0.0.1")));
}

#[test]
fn test_self_reference_is_rejected_without_suppression() {
    let mut a = component("s/a", "0.0.1");
    a.dependencies.push(id("s/a"));

    let err = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap_err();
    match err {
        TagError::Issues(found) => {
            assert_eq!(found.issues[0].kind(), IssueKind::SelfReference);
        }
        other => panic!("expected issues, got {:?}", other),
    }
}

// ============================================================================
// Reference resolution
// ============================================================================

#[test]
fn test_siblings_point_at_new_versions() {
    let mut a = component("s/a", "1.0.0");
    a.dependencies.push(id("s/b@0.0.1"));
    let b = component("s/b", "2.0.0");

    let result = tag_components(&request(vec![a, b]), &IssueSuppressions::none()).unwrap();
    let a = tagged(&result, "s/a");
    assert_eq!(a.version.dependencies.get()[0].id.to_string(), "s/b@2.0.0");
    assert_eq!(a.version.flattened_dependencies.len(), 1);
}

#[test]
fn test_versionless_dependency_resolves_to_latest_known() {
    let mut a = component("s/a", "1.0.0");
    a.dev_dependencies.push(id("s/lib"));
    let mut req = request(vec![a]);
    req.known_versions = ["s/lib@1.0.0", "s/lib@1.2.0", "s/lib@1.1.0"]
        .iter()
        .map(|s| id(s))
        .collect();

    let result = tag_components(&req, &IssueSuppressions::none()).unwrap();
    let a = &result[0];
    assert_eq!(
        a.version.dev_dependencies.get()[0].id.to_string(),
        "s/lib@1.2.0"
    );
    assert!(a.version.flattened_dependencies.has(&id("s/lib@1.2.0")));
}

#[test]
fn test_unknown_dependency_is_rejected() {
    let mut a = component("s/a", "1.0.0");
    a.dependencies.push(id("s/missing"));
    let err = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap_err();
    assert!(matches!(err, TagError::Unversioned { .. }));
}

#[test]
fn test_known_edges_are_walked_transitively() {
    let mut a = component("s/a", "1.0.0");
    a.dependencies.push(id("s/x@1.0.0"));
    let mut req = request(vec![a]);
    req.known_edges = vec![ComponentEdges {
        id: id("s/x@1.0.0"),
        dependencies: vec![DirectDependency {
            id: id("s/y@3.0.0"),
            kind: EdgeKind::Runtime,
        }],
    }];

    let result = tag_components(&req, &IssueSuppressions::none()).unwrap();
    let flattened = &result[0].version.flattened_dependencies;
    assert!(flattened.has(&id("s/x@1.0.0")));
    assert!(flattened.has(&id("s/y@3.0.0")));
}

// ============================================================================
// Version contents
// ============================================================================

#[test]
fn test_version_carries_harmony_schema_and_producer() {
    let result =
        tag_components(&request(vec![component("s/a", "1.0.0")]), &IssueSuppressions::none())
            .unwrap();
    let version = &result[0].version;
    assert_eq!(version.schema, Some(SchemaName::Harmony));
    assert_eq!(version.producer_version, Some(PRODUCER_VERSION));
    assert_eq!(version.files[0].name, "index.ts");
    assert_eq!(version.log.as_ref().unwrap().message, "tag");
}

#[test]
fn test_extensions_are_part_of_flattened() {
    let mut a = component("s/a", "1.0.0");
    a.extensions.push(id("teambit.react/react@1.0.0"));
    let result = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap();
    let version = &result[0].version;
    assert_eq!(version.extensions.len(), 1);
    assert!(
        version
            .flattened_dependencies
            .has(&id("teambit.react/react@1.0.0"))
    );
}

#[test]
fn test_previous_head_becomes_parent() {
    let mut a = component("s/a", "1.0.1");
    a.previous_head = Some(Ref::new(PREVIOUS_HEAD));
    a.message = Some("fix".to_string());
    let result = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap();
    let version = &result[0].version;
    assert_eq!(version.parents, vec![Ref::new(PREVIOUS_HEAD)]);
    assert_eq!(version.log.as_ref().unwrap().message, "fix");
}

#[test]
fn test_manifest_lists_installable_requests() {
    let mut a = component("s/a", "1.0.0");
    a.package_dependencies
        .insert("lodash".to_string(), "^4.17.0".to_string());
    a.dev_package_dependencies
        .insert("jest".to_string(), "^29.0.0".to_string());

    let result = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap();
    let manifest = result[0].manifest();
    assert_eq!(manifest.id, id("s/a@1.0.0"));
    assert_eq!(manifest.manifest.dependencies["lodash"], "^4.17.0");
    assert_eq!(manifest.manifest.dev_dependencies["jest"], "^29.0.0");
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_duplicate_component_in_request() {
    let req = request(vec![component("s/a", "1.0.0"), component("s/a", "1.0.1")]);
    let err = tag_components(&req, &IssueSuppressions::none()).unwrap_err();
    assert!(matches!(err, TagError::DuplicateComponent { id } if id == "s/a"));
}

#[test]
fn test_missing_new_version_is_rejected() {
    let mut a = component("s/a", "1.0.0");
    a.version = None;
    let err = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap_err();
    assert!(matches!(err, TagError::NotConcrete { .. }));
}

#[test]
fn test_invalid_version_is_rejected() {
    let mut a = component("s/a", "1.0.0");
    a.main_file = String::new();
    let err = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap_err();
    match err {
        TagError::Invalid { id, source } => {
            assert_eq!(id, "s/a@1.0.0");
            assert!(source.to_string().contains("the mainFile is missing"));
        }
        other => panic!("expected invalid version, got {:?}", other),
    }
}

#[test]
fn test_same_dependency_in_two_lifecycles_is_rejected() {
    let mut a = component("s/a", "1.0.0");
    a.dependencies.push(id("s/lib@1.0.0"));
    a.dev_dependencies.push(id("s/lib@1.0.0"));
    let err = tag_components(&request(vec![a]), &IssueSuppressions::none()).unwrap_err();
    assert!(matches!(
        err,
        TagError::Invalid {
            source: ValidationError::DuplicateDependencies(_),
            ..
        }
    ));
}
