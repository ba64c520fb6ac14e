use super::*;

#[test]
fn test_ref_of_produces_snap_width_hash() {
    let hash = Ref::of(b"hello");
    assert_eq!(hash.as_str().len(), HASH_LENGTH);
    assert!(hash.is_valid());
    assert_eq!(hash.as_str(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
}

#[test]
fn test_ref_of_is_deterministic() {
    assert_eq!(Ref::of(b"same"), Ref::of(b"same"));
    assert_ne!(Ref::of(b"same"), Ref::of(b"other"));
}

#[test]
fn test_is_snap() {
    assert!(is_snap("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"));
    assert!(!is_snap("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434"));
    assert!(!is_snap("zzf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"));
    assert!(!is_snap("0.0.1"));
}

#[test]
fn test_is_tag() {
    assert!(is_tag("0.0.1"));
    assert!(is_tag("1.2.3-rc.1"));
    assert!(!is_tag("1.2"));
    assert!(!is_tag("latest"));
    assert!(!is_tag("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"));
}

#[test]
fn test_unvalidated_ref_can_hold_garbage() {
    let hash = Ref::new("not-a-hash");
    assert!(!hash.is_valid());
    assert!(!hash.is_empty());
    assert!(Ref::new("").is_empty());
}
