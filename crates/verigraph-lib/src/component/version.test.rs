use super::*;
use crate::component::dependencies::Dependency;
use crate::component::extensions::ExtensionDataEntry;

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

#[test]
fn test_hash_is_stable_and_content_sensitive() {
    let mut version = Version {
        main_file: "index.js".to_string(),
        files: vec![SourceFile::from_content("index.js", b"export {}")],
        ..Default::default()
    };
    let first = version.hash();
    assert_eq!(first, version.hash());
    assert!(first.is_valid());

    version.main_file = "other.js".to_string();
    assert_ne!(first, version.hash());
}

#[test]
fn test_source_file_name_is_last_segment() {
    let file = SourceFile::from_content("src/utils/is-string.js", b"");
    assert_eq!(file.name, "is-string.js");
    assert_eq!(file.relative_path, "src/utils/is-string.js");
}

#[test]
fn test_is_legacy_without_schema() {
    let mut version = Version::default();
    assert!(version.is_legacy());
    version.schema = Some(SchemaName::Harmony);
    assert!(!version.is_legacy());
}

#[test]
fn test_dependency_entries_cover_every_kind() {
    let mut version = Version::default();
    version.dependencies.add(Dependency::new(id("s/a@1.0.0")));
    version.dev_dependencies.add(Dependency::new(id("s/b@1.0.0")));
    version
        .peer_package_dependencies
        .insert("react".to_string(), "^18.0.0".to_string());
    version
        .extensions
        .push(ExtensionDataEntry::from_id(id("s/env@1.0.0")));

    let entries = version.dependency_entries();
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().any(|e| matches!(
        e,
        DependencyEntry::Package { name, lifecycle: Lifecycle::Peer, .. } if name == "react"
    )));

    assert_eq!(version.dependencies_ids_exclude_extensions().len(), 2);
}

#[test]
fn test_serde_uses_camel_case_and_schema_names() {
    let version = Version {
        main_file: "index.js".to_string(),
        schema: Some(SchemaName::Harmony),
        producer_version: Some(semver::Version::new(1, 0, 0)),
        ..Default::default()
    };
    let json = serde_json::to_value(&version).unwrap();
    assert_eq!(json["mainFile"], "index.js");
    assert_eq!(json["schema"], "1.0.0");
    assert_eq!(json["producerVersion"], "1.0.0");

    let back: Version = serde_json::from_value(json).unwrap();
    assert_eq!(back, version);
}

#[test]
fn test_legacy_fields_are_flattened() {
    let json = serde_json::json!({
        "mainFile": "index.js",
        "compiler": "bit.envs/compilers/babel@1.0.0",
        "mainDistFile": "dist/index.js"
    });
    let version: Version = serde_json::from_value(json).unwrap();
    assert!(version.legacy.compiler.is_some());
    assert_eq!(version.legacy.main_dist_file.as_deref(), Some("dist/index.js"));
}
