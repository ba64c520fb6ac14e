use super::*;

const SNAP: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_scoped_id_with_tag() {
    let id: ComponentId = "my-scope/utils/is-string@0.0.1".parse().unwrap();
    assert_eq!(id.scope.as_deref(), Some("my-scope"));
    assert_eq!(id.name, "utils/is-string");
    assert_eq!(id.tag(), Some(&semver::Version::new(0, 0, 1)));
    assert_eq!(id.to_string(), "my-scope/utils/is-string@0.0.1");
}

#[test]
fn test_parse_single_segment_has_no_scope() {
    let id: ComponentId = "foo".parse().unwrap();
    assert_eq!(id.scope, None);
    assert_eq!(id.name, "foo");
    assert!(!id.has_version());
}

#[test]
fn test_parse_without_scope_keeps_full_path() {
    let id = ComponentId::parse_without_scope("comp/a@0.0.2").unwrap();
    assert_eq!(id.scope, None);
    assert_eq!(id.name, "comp/a");
    assert!(id.has_version());
}

#[test]
fn test_parse_snap_version() {
    let id: ComponentId = format!("scope/bar@{SNAP}").parse().unwrap();
    assert!(id.is_snap());
    assert!(id.tag().is_none());
}

#[test]
fn test_parse_latest_marker_is_not_a_version() {
    let id: ComponentId = "scope/bar@latest".parse().unwrap();
    assert_eq!(id.version, Some(VersionRef::Latest));
    assert!(!id.has_version());
}

#[test]
fn test_parse_garbage_version_is_kept_raw() {
    let id: ComponentId = "scope/bar@1.0".parse().unwrap();
    assert_eq!(id.version, Some(VersionRef::Raw("1.0".to_string())));
    assert!(id.has_version());
    assert!(!id.version.as_ref().unwrap().is_concrete());
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<ComponentId>(), Err(ParseIdError::Empty));
    assert!(matches!(
        "scope/bar@".parse::<ComponentId>(),
        Err(ParseIdError::EmptyVersion { .. })
    ));
    assert!(matches!(
        "scope/@1.0.0".parse::<ComponentId>(),
        Err(ParseIdError::EmptyName { .. })
    ));
}

#[test]
fn test_serde_object_form() {
    let id: ComponentId = "remote/comp/b@0.0.1".parse().unwrap();
    let json = serde_json::to_value(&id).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"scope": "remote", "name": "comp/b", "version": "0.0.1"})
    );
    let back: ComponentId = serde_json::from_value(json).unwrap();
    assert_eq!(back, id);
}

// ============================================================================
// Comparison and lists
// ============================================================================

#[test]
fn test_equality_without_version() {
    let a1: ComponentId = "s/a@1.0.0".parse().unwrap();
    let a2: ComponentId = "s/a@2.0.0".parse().unwrap();
    assert_ne!(a1, a2);
    assert!(a1.is_equal_without_version(&a2));
    assert_eq!(a1.to_string_without_version(), "s/a");
}

#[test]
fn test_change_version() {
    let a: ComponentId = "s/a@1.0.0".parse().unwrap();
    let b = a.change_version(None);
    assert_eq!(b.to_string(), "s/a");
    assert_eq!(a.to_string(), "s/a@1.0.0");

    let snapped = ComponentId::new("s", "a").with_version(VersionRef::Snap(Ref::new(SNAP)));
    assert!(snapped.is_snap());
    assert_eq!(snapped.to_string(), format!("s/a@{}", SNAP));
}

#[test]
fn test_list_search_and_membership() {
    let list: ComponentIdList = ["s/a@1.0.0", "s/b@1.0.0"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

    let a: ComponentId = "s/a@1.0.0".parse().unwrap();
    let a2: ComponentId = "s/a@2.0.0".parse().unwrap();
    assert!(list.has(&a));
    assert!(!list.has(&a2));
    assert_eq!(list.search(&a), Some(&a));
    assert_eq!(list.search(&a2), None);
}

#[test]
fn test_find_duplications_ignore_version() {
    let list: ComponentIdList = ["s/a@1.0.0", "s/b@1.0.0", "s/a@2.0.0"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

    let dups = list.find_duplications_ignore_version();
    assert_eq!(dups.len(), 1);
    let a = &dups["s/a"];
    assert_eq!(a.len(), 2);
    assert_eq!(a[0].to_string(), "s/a@1.0.0");
    assert_eq!(a[1].to_string(), "s/a@2.0.0");
}
