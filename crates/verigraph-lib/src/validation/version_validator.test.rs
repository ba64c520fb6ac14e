use super::*;
use crate::component::{
    Dependency, ExtensionDataEntry, Log, Ref, RelativePath, SchemaName, SourceFile, Unrelated,
};
use serde_json::json;

// ============================================================================
// Test Utilities
// ============================================================================

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

fn owner() -> ComponentId {
    id("my-scope/button@1.0.0")
}

fn producer(major: u64, minor: u64, patch: u64) -> Option<SemVer> {
    Some(SemVer::new(major, minor, patch))
}

/// Smallest Version that passes every check
fn valid_version() -> Version {
    Version {
        main_file: "index.js".to_string(),
        files: vec![
            SourceFile::from_content("index.js", b"export * from './button';"),
            SourceFile::from_content("button.js", b"export const Button = 1;"),
        ],
        log: Some(Log {
            message: "first tag".to_string(),
            ..Default::default()
        }),
        schema: Some(SchemaName::Harmony),
        producer_version: producer(1, 0, 0),
        ..Default::default()
    }
}

fn with_dependency(mut version: Version, lifecycle: Lifecycle, dep: &str) -> Version {
    let dep = id(dep);
    match lifecycle {
        Lifecycle::Runtime => version.dependencies.add(Dependency::new(dep.clone())),
        Lifecycle::Dev => version.dev_dependencies.add(Dependency::new(dep.clone())),
        Lifecycle::Peer => version.peer_dependencies.add(Dependency::new(dep.clone())),
    };
    if !version.flattened_dependencies.has(&dep) {
        version.flattened_dependencies.push(dep);
    }
    version
}

fn message(result: Result<(), ValidationError>) -> String {
    result.unwrap_err().to_string()
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_valid_version_passes() {
    assert_eq!(validate(&valid_version(), Some(&owner())), Ok(()));
    assert_eq!(validate(&valid_version(), None), Ok(()));
}

#[test]
fn test_error_names_the_component() {
    let mut version = valid_version();
    version.main_file.clear();
    let msg = message(validate(&version, Some(&owner())));
    assert_eq!(
        msg,
        "unable to save Version object of \"my-scope/button@1.0.0\", the mainFile is missing"
    );
}

#[test]
fn test_error_without_owner_names_the_hash() {
    let mut version = valid_version();
    version.main_file.clear();
    let msg = message(validate(&version, None));
    assert!(msg.starts_with("unable to save Version object hash "));
}

#[test]
fn test_invalid_main_file_path() {
    let mut version = valid_version();
    version.main_file = "../index.js".to_string();
    assert!(message(validate(&version, None)).contains("the mainFile ../index.js is invalid"));
}

#[test]
fn test_main_file_must_be_among_files() {
    let mut version = valid_version();
    version.main_file = "main.js".to_string();
    let msg = message(validate(&version, None));
    assert!(msg.contains("unable to find the mainFile main.js"));
    assert!(msg.contains("index.js, button.js"));
}

#[test]
fn test_files_missing() {
    let mut version = valid_version();
    version.files.clear();
    assert!(message(validate(&version, None)).contains("the files are missing"));
}

#[test]
fn test_file_without_hash() {
    let mut version = valid_version();
    version.files[1].file = Ref::default();
    assert!(message(validate(&version, None)).contains("the file button.js is missing the hash"));
}

#[test]
fn test_duplicate_files_ignore_case() {
    let mut version = valid_version();
    version
        .files
        .push(SourceFile::from_content("Button.js", b"other"));
    let msg = message(validate(&version, None));
    assert!(msg.contains("the following files are duplicated button.js, Button.js"));
}

// ============================================================================
// Packages
// ============================================================================

#[test]
fn test_invalid_package_name() {
    let mut version = valid_version();
    version
        .package_dependencies
        .insert(".hidden".to_string(), "1.0.0".to_string());
    let msg = message(validate(&version, None));
    assert!(msg.contains(".hidden is invalid package name"));
    assert!(msg.contains("name cannot start with a period"));
}

#[test]
fn test_package_value_must_not_be_empty() {
    let mut version = valid_version();
    version
        .dev_package_dependencies
        .insert("lodash".to_string(), String::new());
    assert!(message(validate(&version, None)).contains("the version of \"lodash\" is empty"));
}

#[test]
fn test_package_value_may_be_a_url() {
    let mut version = valid_version();
    version.package_dependencies.insert(
        "lodash".to_string(),
        "git+https://github.com/lodash/lodash.git".to_string(),
    );
    assert_eq!(validate(&version, None), Ok(()));
}

// ============================================================================
// Extensions (producer-version gated)
// ============================================================================

fn with_duplicate_extension(producer_version: Option<SemVer>) -> Version {
    let mut version = valid_version();
    version.producer_version = producer_version;
    let ext = id("teambit.react/react@1.0.0");
    version
        .extensions
        .push(ExtensionDataEntry::from_id(ext.clone()));
    version.extensions.push(ExtensionDataEntry::from_id(ext.clone()));
    version.flattened_dependencies.push(ext);
    version
}

#[test]
fn test_duplicate_extensions_rejected_since_fix() {
    let msg = message(validate(&with_duplicate_extension(producer(0, 0, 882)), None));
    assert!(msg.contains("the following extensions entries are duplicated teambit.react/react@1.0.0"));
}

#[test]
fn test_duplicate_extensions_tolerated_for_old_or_unknown_producers() {
    assert_eq!(
        validate(&with_duplicate_extension(producer(0, 0, 881)), None),
        Ok(())
    );
    assert_eq!(validate(&with_duplicate_extension(None), None), Ok(()));
}

fn with_unflattened_extension(producer_version: Option<SemVer>) -> Version {
    let mut version = valid_version();
    version.producer_version = producer_version;
    version
        .extensions
        .push(ExtensionDataEntry::from_id(id("teambit.react/react@1.0.0")));
    version
}

#[test]
fn test_extension_missing_from_flattened() {
    let msg = message(validate(&with_unflattened_extension(producer(0, 0, 948)), None));
    assert!(msg.contains(
        "the extension teambit.react/react@1.0.0 is missing from the flattenedDependencies"
    ));
}

#[test]
fn test_extension_missing_from_flattened_gate() {
    assert_eq!(
        validate(&with_unflattened_extension(producer(0, 0, 947)), None),
        Ok(())
    );
    assert_eq!(validate(&with_unflattened_extension(None), None), Ok(()));
}

#[test]
fn test_core_extensions_need_no_flattened_entry() {
    let mut version = valid_version();
    version
        .extensions
        .push(ExtensionDataEntry::from_name("teambit.pkg/pkg"));
    assert_eq!(validate(&version, None), Ok(()));
}

#[test]
fn test_extension_id_requires_version() {
    let mut version = valid_version();
    version.producer_version = None;
    version
        .extensions
        .push(ExtensionDataEntry::from_id(id("teambit.react/react")));
    assert!(message(validate(&version, None)).contains("does not have a version"));
}

// ============================================================================
// Dependencies
// ============================================================================

#[test]
fn test_dependencies_require_flattened() {
    let mut version = valid_version();
    version.dependencies.add(Dependency::new(id("s/a@1.0.0")));
    assert!(
        message(validate(&version, None))
            .contains("it has dependencies but its flattenedDependencies is empty")
    );
}

#[test]
fn test_dev_dependencies_require_flattened() {
    let mut version = valid_version();
    version.dev_dependencies.add(Dependency::new(id("s/a@1.0.0")));
    assert!(message(validate(&version, None)).contains("flattenedDependencies is empty"));
}

#[test]
fn test_flattened_dependency_requires_concrete_version() {
    let mut version = with_dependency(valid_version(), Lifecycle::Runtime, "s/a@1.0.0");
    version.flattened_dependencies.push(id("s/b"));
    assert!(
        message(validate(&version, None))
            .contains("the flattenedDependency s/b does not have a version")
    );
}

#[test]
fn test_dependency_list_errors_are_typed() {
    let version = with_dependency(valid_version(), Lifecycle::Runtime, "my-scope/button@1.0.0");
    let result = validate(&version, Some(&owner()));
    assert!(matches!(
        result,
        Err(ValidationError::InvalidDependency {
            source: crate::component::DependencyError::SameAsComponent { .. },
            ..
        })
    ));
}

#[test]
fn test_duplicate_dependencies_across_categories() {
    let version = with_dependency(valid_version(), Lifecycle::Runtime, "s/a@1.0.0");
    let version = with_dependency(version, Lifecycle::Dev, "s/a@2.0.0");

    match validate(&version, Some(&owner())) {
        Err(ValidationError::DuplicateDependencies(err)) => {
            assert_eq!(err.component, "my-scope/button@1.0.0");
            assert_eq!(
                err.clashes["s/a"],
                vec!["s/a@1.0.0".to_string(), "s/a@2.0.0".to_string()]
            );
            let msg = err.to_string();
            assert!(msg.contains("\"s/a\" shows as the following: s/a@1.0.0, s/a@2.0.0"));
            assert!(msg.contains("make sure to add it with a minus sign"));
        }
        other => panic!("expected duplicate dependencies, got {:?}", other),
    }
}

#[test]
fn test_duplicate_reconciled_by_remove_marker() {
    let mut version = with_dependency(valid_version(), Lifecycle::Runtime, "s/a@1.0.0");
    version = with_dependency(version, Lifecycle::Dev, "s/a@2.0.0");
    version.overrides.insert(
        "devDependencies".to_string(),
        json!({"s/a": "-", "lodash": "^4.0.0"}),
    );
    assert_eq!(validate(&version, None), Ok(()));
}

#[test]
fn test_extension_overlapping_dependency_is_allowed() {
    let mut version = with_dependency(valid_version(), Lifecycle::Dev, "s/compile@1.0.0");
    version
        .extensions
        .push(ExtensionDataEntry::from_id(id("s/compile@1.0.0")));
    assert_eq!(validate(&version, None), Ok(()));
}

// ============================================================================
// Overrides and package.json props
// ============================================================================

#[test]
fn test_overrides_forbidden_keys() {
    for key in ["name", "main", "version", "bit"] {
        let mut version = valid_version();
        version.overrides.insert(key.to_string(), json!("x"));
        let msg = message(validate(&version, None));
        assert!(msg.contains(&format!("the \"overrides\" has a forbidden key \"{}\"", key)));
    }
}

#[test]
fn test_overrides_dependencies_must_be_object_of_strings() {
    let mut version = valid_version();
    version
        .overrides
        .insert("dependencies".to_string(), json!(["lodash"]));
    assert!(message(validate(&version, None)).contains("overrides.dependencies to be object"));

    let mut version = valid_version();
    version
        .overrides
        .insert("peerDependencies".to_string(), json!({"react": 18}));
    assert!(message(validate(&version, None)).contains("\"react\" in overrides.peerDependencies"));
}

#[test]
fn test_overrides_package_json_field_types() {
    let mut version = valid_version();
    version
        .overrides
        .insert("scripts".to_string(), json!("npm test"));
    let msg = message(validate(&version, None));
    assert!(msg.contains("\"overrides.scripts\" is a package.json field"));

    let mut version = valid_version();
    version.overrides.insert("env".to_string(), json!(42));
    version
        .overrides
        .insert("myCustomField".to_string(), json!(42));
    assert_eq!(validate(&version, None), Ok(()));
}

#[test]
fn test_package_json_changed_props() {
    let mut version = valid_version();
    version
        .package_json_changed_props
        .insert("license".to_string(), json!("MIT"));
    assert!(
        message(validate(&version, None))
            .contains("the packageJsonChangedProps should not override the prop license")
    );

    let mut version = valid_version();
    version
        .package_json_changed_props
        .insert("private".to_string(), json!("yes"));
    assert!(message(validate(&version, None)).contains("generated package.json field \"private\""));

    let mut version = valid_version();
    version
        .package_json_changed_props
        .insert("description".to_string(), json!("a button"));
    assert_eq!(validate(&version, None), Ok(()));
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_parent_must_be_a_snap() {
    let mut version = valid_version();
    version.parents.push(Ref::new("not-a-hash"));
    assert!(
        message(validate(&version, None))
            .contains("its parent \"not-a-hash\" is not a valid snap (40 chars hex).")
    );
}

#[test]
fn test_log_is_required() {
    let mut version = valid_version();
    version.log = None;
    assert!(message(validate(&version, None)).contains("the log object is missing"));
}

fn with_unrelated_parent(producer_version: Option<SemVer>) -> Version {
    let mut version = valid_version();
    version.producer_version = producer_version;
    let head = Ref::of(b"previous");
    version.parents.push(head.clone());
    version.unrelated = Some(Unrelated { head });
    version
}

#[test]
fn test_unrelated_head_equal_to_parent() {
    let msg = message(validate(&with_unrelated_parent(producer(0, 2, 34)), None));
    assert!(msg.contains("the unrelated.head is the same as the parent"));
    assert_eq!(validate(&with_unrelated_parent(producer(0, 2, 33)), None), Ok(()));
    assert_eq!(validate(&with_unrelated_parent(None), None), Ok(()));
}

// ============================================================================
// Schema and owner version
// ============================================================================

#[test]
fn test_current_schema_forbids_legacy_fields() {
    let mut version = valid_version();
    version.legacy.compiler = Some(json!("bit.envs/compilers/babel@1.0.0"));
    assert!(
        message(validate(&version, None))
            .contains("the compiler field is not permitted according to schema \"1.0.0\"")
    );

    let mut version = valid_version();
    version
        .legacy
        .custom_resolved_paths
        .insert("a".to_string(), "b".to_string());
    assert!(message(validate(&version, None)).contains("customResolvedPaths field cannot have values"));
}

#[test]
fn test_current_schema_forbids_relative_paths() {
    let mut version = with_dependency(valid_version(), Lifecycle::Runtime, "s/a@1.0.0");
    let mut dep = Dependency::new(id("s/b@1.0.0"));
    dep.relative_paths.push(RelativePath {
        source_relative_path: "index.js".to_string(),
        destination_relative_path: "b.js".to_string(),
        import_specifiers: None,
    });
    version.dependencies.add(dep);
    version.flattened_dependencies.push(id("s/b@1.0.0"));

    assert!(
        message(validate(&version, None))
            .contains("the dependencies should not have relativePaths according to schema")
    );
}

#[test]
fn test_legacy_schema_allows_legacy_fields_but_not_builder() {
    let mut version = valid_version();
    version.schema = None;
    version.legacy.compiler = Some(json!("bit.envs/compilers/babel@1.0.0"));
    assert_eq!(validate(&version, None), Ok(()));

    version
        .extensions
        .push(ExtensionDataEntry::from_name(BUILDER_EXTENSION));
    assert!(
        message(validate(&version, None))
            .contains("the extensions should not include \"teambit.pipelines/builder\" as of the schema \"0.0.0\"")
    );
}

#[test]
fn test_owner_version_must_be_snap_or_tag() {
    let bad_owner = id("my-scope/button@1.0");
    let msg = message(validate(&valid_version(), Some(&bad_owner)));
    assert!(msg.contains("the version \"1.0\" is invalid. it's not a hash (snap) nor a tag"));

    let snap_owner = id("my-scope/button@aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    assert_eq!(validate(&valid_version(), Some(&snap_owner)), Ok(()));
}
