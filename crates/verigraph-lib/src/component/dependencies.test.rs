use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

/// A dependency shaped like the output of static analysis on legacy components
fn analyzed_dependency() -> Dependency {
    Dependency {
        id: id("81j4te29-remote/utils/is-string@0.0.1"),
        relative_paths: vec![RelativePath {
            source_relative_path: "src/utils/index.js".to_string(),
            destination_relative_path: "src/utils/is-string.js".to_string(),
            import_specifiers: Some(vec![ImportSpecifier {
                main_file: MainFileSpecifier {
                    is_default: false,
                    name: "isString".to_string(),
                },
            }]),
        }],
        package_name: None,
        version_range: None,
    }
}

// ============================================================================
// DependencyList
// ============================================================================

#[test]
fn test_valid_dependencies_pass() {
    let list: DependencyList = vec![analyzed_dependency()].into_iter().collect();
    assert!(list.validate(None).is_ok());
}

#[test]
fn test_add_is_keyed_on_full_id() {
    let mut list = DependencyList::new();
    assert!(list.add(Dependency::new(id("s/a@1.0.0"))));
    assert!(!list.add(Dependency::new(id("s/a@1.0.0"))));
    assert!(list.add(Dependency::new(id("s/a@2.0.0"))));
    assert_eq!(list.len(), 2);
    assert!(list.has(&id("s/a@2.0.0")));
    assert!(!list.has(&id("s/a@3.0.0")));
}

#[test]
fn test_dependency_without_version_fails() {
    let list: DependencyList = vec![Dependency::new(id("s/a"))].into_iter().collect();
    assert_eq!(
        list.validate(None),
        Err(DependencyError::MissingVersion {
            id: "s/a".to_string()
        })
    );
}

#[test]
fn test_dependency_without_scope_fails() {
    let dep = Dependency::new(ComponentId::parse_without_scope("a@1.0.0").unwrap());
    let list: DependencyList = vec![dep].into_iter().collect();
    assert!(matches!(
        list.validate(None),
        Err(DependencyError::MissingScope { .. })
    ));
}

#[test]
fn test_invalid_relative_path_names_the_field() {
    let mut dep = analyzed_dependency();
    dep.relative_paths[0].destination_relative_path = "/abs.js".to_string();
    let list: DependencyList = vec![dep].into_iter().collect();

    let err = list.validate(None).unwrap_err();
    assert!(err.to_string().contains("relativePaths.destinationRelativePath"));
}

#[test]
fn test_empty_import_specifier_name_fails() {
    let mut dep = analyzed_dependency();
    dep.relative_paths[0].import_specifiers.as_mut().unwrap()[0]
        .main_file
        .name
        .clear();
    let list: DependencyList = vec![dep].into_iter().collect();
    assert!(matches!(
        list.validate(None),
        Err(DependencyError::EmptyImportSpecifier { .. })
    ));
}

#[test]
fn test_dependency_equal_to_component_fails() {
    let list: DependencyList = vec![analyzed_dependency()].into_iter().collect();
    let owner = id("81j4te29-remote/utils/is-string@0.0.1");

    let err = list.validate(Some(&owner)).unwrap_err();
    assert!(
        err.to_string()
            .contains("one of the dependencies has the same id as the component")
    );
}

#[test]
fn test_deserialize_rejects_repeated_ids_and_unknown_fields() {
    let repeated = serde_json::json!([
        {"id": {"scope": "s", "name": "a", "version": "1.0.0"}},
        {"id": {"scope": "s", "name": "a", "version": "1.0.0"}}
    ]);
    assert!(serde_json::from_value::<DependencyList>(repeated).is_err());

    let extra = serde_json::json!([
        {"id": {"scope": "s", "name": "a", "version": "1.0.0"}, "extra": "should not be there!"}
    ]);
    assert!(serde_json::from_value::<DependencyList>(extra).is_err());
}

// ============================================================================
// DependencyEntry
// ============================================================================

#[test]
fn test_component_entry_manifest_uses_package_name() {
    let entry = DependencyEntry::Component {
        id: id("s/button@1.2.0"),
        lifecycle: Lifecycle::Runtime,
        package_name: Some("@s/button".to_string()),
    };
    assert_eq!(
        entry.manifest_entry(),
        Some(("@s/button".to_string(), "1.2.0".to_string()))
    );
}

#[test]
fn test_extension_entry_is_dev_and_not_installable() {
    let entry = DependencyEntry::Extension {
        id: id("teambit.react/react@1.0.0"),
    };
    assert_eq!(entry.lifecycle(), Lifecycle::Dev);
    assert_eq!(entry.manifest_entry(), None);
}

#[test]
fn test_lifecycle_field_names() {
    assert_eq!(Lifecycle::Runtime.field_name(), "dependencies");
    assert_eq!(Lifecycle::Dev.field_name(), "devDependencies");
    assert_eq!(Lifecycle::Peer.field_name(), "peerDependencies");
}
