use super::*;
use crate::component::{ComponentId, Dependency};

#[test]
fn test_contains_checks_every_field() {
    let mut manifest = ManifestDependencies::default();
    assert!(manifest.is_empty());
    manifest
        .peer_dependencies
        .insert("react".to_string(), "^18.0.0".to_string());
    assert!(manifest.contains("react"));
    assert!(!manifest.contains("lodash"));
    assert!(!manifest.is_empty());
}

#[test]
fn test_from_version_includes_published_components() {
    let mut version = Version::default();
    version
        .package_dependencies
        .insert("lodash".to_string(), "^4.17.0".to_string());
    let button: ComponentId = "my-scope/button@1.2.0".parse().unwrap();
    version
        .dev_dependencies
        .add(Dependency::new(button).with_package_name("@my-scope/button"));
    let unpublished: ComponentId = "my-scope/internal@1.0.0".parse().unwrap();
    version.dependencies.add(Dependency::new(unpublished));

    let manifest = ManifestDependencies::from_version(&version);
    assert_eq!(manifest.dependencies.len(), 1);
    assert_eq!(manifest.dependencies["lodash"], "^4.17.0");
    assert_eq!(manifest.dev_dependencies["@my-scope/button"], "1.2.0");
}

#[test]
fn test_serde_field_names() {
    let json = serde_json::json!({
        "rootDependencies": {"devDependencies": {"jest": "29.0.0"}},
        "componentDependenciesMap": {}
    });
    let deduped: DedupedDependencies = serde_json::from_value(json).unwrap();
    assert_eq!(
        deduped.root_dependencies.dev_dependencies["jest"],
        "29.0.0"
    );
}
