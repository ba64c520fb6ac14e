use super::*;

const SNAP_A: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";
const SNAP_B: &str = "0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33";

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

fn list(ids: &[&str]) -> ComponentIdList {
    ids.iter().map(|s| id(s)).collect()
}

#[test]
fn test_concrete_request_is_returned_unchanged() {
    let candidates = list(&["s/baz@2.0.0"]);
    let resolved = resolve_latest(&candidates, &id("s/baz@1.2.3")).unwrap();
    assert_eq!(resolved.to_string(), "s/baz@1.2.3");
}

#[test]
fn test_snaps_are_excluded_from_ranking() {
    let snap = format!("s/foo@{}", SNAP_A);
    let candidates = list(&["s/foo@0.0.1", "s/foo@0.0.2", snap.as_str()]);
    let resolved = resolve_latest(&candidates, &id("s/foo")).unwrap();
    assert_eq!(resolved.to_string(), "s/foo@0.0.2");
}

#[test]
fn test_latest_marker_resolves_like_no_version() {
    let candidates = list(&["s/foo@0.0.1", "s/foo@0.0.2"]);
    let resolved = resolve_latest(&candidates, &id("s/foo@latest")).unwrap();
    assert_eq!(resolved.to_string(), "s/foo@0.0.2");
}

#[test]
fn test_prereleases_take_part_in_ordering() {
    let candidates = list(&["s/foo@1.0.0", "s/foo@1.1.0-rc.1", "s/foo@1.0.1"]);
    let resolved = resolve_latest(&candidates, &id("s/foo")).unwrap();
    assert_eq!(resolved.to_string(), "s/foo@1.1.0-rc.1");
}

#[test]
fn test_semver_ordering_not_string_ordering() {
    let candidates = list(&["s/foo@0.0.9", "s/foo@0.0.10"]);
    let resolved = resolve_latest(&candidates, &id("s/foo")).unwrap();
    assert_eq!(resolved.to_string(), "s/foo@0.0.10");
}

#[test]
fn test_multiple_snaps_are_ambiguous() {
    let a = format!("s/bar@{}", SNAP_A);
    let b = format!("s/bar@{}", SNAP_B);
    let candidates = list(&[a.as_str(), b.as_str()]);
    let err = resolve_latest(&candidates, &id("s/bar")).unwrap_err();
    match err {
        ResolveError::AmbiguousSnapSet { id, snaps } => {
            assert_eq!(id, "s/bar");
            assert_eq!(snaps.len(), 2);
        }
        other => panic!("expected ambiguous snaps, got {:?}", other),
    }
}

#[test]
fn test_single_snap_is_returned() {
    let a = format!("s/bar@{}", SNAP_A);
    let candidates = list(&[a.as_str(), "s/other@1.0.0"]);
    let resolved = resolve_latest(&candidates, &id("s/bar")).unwrap();
    assert!(resolved.is_snap());
}

#[test]
fn test_unknown_component_is_returned_unchanged() {
    let candidates = list(&["s/foo@1.0.0"]);
    let resolved = resolve_latest(&candidates, &id("s/unknown")).unwrap();
    assert_eq!(resolved.to_string(), "s/unknown");
}

#[test]
fn test_unscoped_request_matches_scoped_candidates() {
    let candidates = list(&["remote/comp@0.0.1", "remote/comp@0.0.2"]);
    let requested = ComponentId::unscoped("comp");
    let resolved = resolve_latest(&candidates, &requested).unwrap();
    assert_eq!(resolved.to_string(), "remote/comp@0.0.2");
}

#[test]
fn test_different_scopes_do_not_match() {
    let candidates = list(&["other/comp@9.0.0", "remote/comp@0.0.2"]);
    let resolved = resolve_latest(&candidates, &id("remote/comp")).unwrap();
    assert_eq!(resolved.to_string(), "remote/comp@0.0.2");
}

#[test]
fn test_rebuilt_id_prefers_the_exact_candidate() {
    let local = ComponentId::unscoped("comp")
        .with_version(VersionRef::Tag(semver::Version::new(2, 0, 0)));
    let candidates: ComponentIdList = [local, id("remote/comp@2.0.0")].into_iter().collect();
    let resolved = resolve_latest(&candidates, &id("remote/comp")).unwrap();
    assert_eq!(resolved.to_string(), "remote/comp@2.0.0");
}
