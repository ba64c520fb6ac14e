use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn manifest(id: &str, deps: &[(Lifecycle, &str, &str)]) -> ComponentManifest {
    let mut manifest = ManifestDependencies::default();
    for (lifecycle, name, range) in deps {
        manifest
            .get_mut(*lifecycle)
            .insert(name.to_string(), range.to_string());
    }
    ComponentManifest {
        id: id.parse().unwrap(),
        manifest,
    }
}

fn runtime(id: &str, name: &str, range: &str) -> ComponentManifest {
    manifest(id, &[(Lifecycle::Runtime, name, range)])
}

// ============================================================================
// Phase 1
// ============================================================================

#[test]
fn test_component_usages_prefer_runtime_then_peer() {
    let component = manifest(
        "s/a@1.0.0",
        &[
            (Lifecycle::Dev, "react", "^17.0.0"),
            (Lifecycle::Peer, "react", "^18.0.0"),
            (Lifecycle::Dev, "jest", "^29.0.0"),
            (Lifecycle::Runtime, "lodash", "^4.0.0"),
            (Lifecycle::Dev, "lodash", "^3.0.0"),
        ],
    );

    let usages = component_usages(&component);
    assert_eq!(usages.len(), 3);
    let react = usages.iter().find(|u| u.name == "react").unwrap();
    assert_eq!(react.lifecycle, Lifecycle::Peer);
    assert_eq!(react.range, "^18.0.0");
    let lodash = usages.iter().find(|u| u.name == "lodash").unwrap();
    assert_eq!(lodash.lifecycle, Lifecycle::Runtime);
    assert_eq!(lodash.component, "s/a@1.0.0");
}

// ============================================================================
// Range normalization
// ============================================================================

#[test]
fn test_normalize_range_npm_forms() {
    let req = normalize_range(">= 1.2.0 < 2.0.0").unwrap();
    assert!(req.matches(&SemVer::new(1, 5, 0)));
    assert!(!req.matches(&SemVer::new(2, 0, 0)));

    // bare versions are exact in npm
    let exact = normalize_range("1.2.3").unwrap();
    assert!(exact.matches(&SemVer::new(1, 2, 3)));
    assert!(!exact.matches(&SemVer::new(1, 2, 4)));

    assert!(normalize_range("^4.17.21").is_some());
    assert!(normalize_range("1.x").is_some());
}

#[test]
fn test_normalize_range_bare_partial_is_an_x_range() {
    let minor = normalize_range("1.2").unwrap();
    assert!(minor.matches(&SemVer::new(1, 2, 9)));
    assert!(!minor.matches(&SemVer::new(1, 5, 0)));

    let major = normalize_range("1").unwrap();
    assert!(major.matches(&SemVer::new(1, 9, 0)));
    assert!(!major.matches(&SemVer::new(2, 0, 0)));
}

#[test]
fn test_normalize_range_rejects_non_semver() {
    for range in [
        "",
        "latest",
        "git+https://github.com/lodash/lodash.git",
        "file:../lodash",
        "1.0.0 - 2.0.0",
        "^1.0.0 || ^2.0.0",
        ">=",
    ] {
        assert!(normalize_range(range).is_none(), "{} should not parse", range);
    }
}

// ============================================================================
// Phase 2
// ============================================================================

#[test]
fn test_identical_ranges_are_hoisted_verbatim() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", "^4.17.0"),
        runtime("s/b@1.0.0", "lodash", "^4.17.0"),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], "^4.17.0");
    assert!(deduped.component_dependencies_map.is_empty());
}

#[test]
fn test_compatible_ranges_hoist_a_shared_version() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", "^4.0.0"),
        runtime("s/b@1.0.0", "lodash", "^4.2.0"),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], "4.2.0");
    assert!(deduped.component_dependencies_map.is_empty());
}

#[test]
fn test_exclusive_bounds_hoist_a_version_inside_both() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", ">1.0.0"),
        runtime("s/b@1.0.0", "lodash", "<2.0.0"),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], "1.0.1");
    assert!(deduped.component_dependencies_map.is_empty());
}

#[test]
fn test_upper_bounds_alone_are_never_hoisted_as_is() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", "<2.0.0"),
        runtime("s/b@1.0.0", "lodash", "<=1.4.0"),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], "1.4.0");
    assert!(deduped.component_dependencies_map.is_empty());
}

#[test]
fn test_bare_partial_version_is_not_widened() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", "1.2"),
        runtime("s/b@1.0.0", "lodash", "^1.5.0"),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], "1.5.0");
    assert_eq!(deduped.component_dependencies_map.len(), 1);
    assert_eq!(
        deduped.component_dependencies_map["s/a@1.0.0"].dependencies["lodash"],
        "1.2"
    );
}

#[test]
fn test_incompatible_subset_keeps_own_range() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", "^1.0.0"),
        runtime("s/b@1.0.0", "lodash", "^1.2.0"),
        runtime("s/c@1.0.0", "lodash", "^2.0.0"),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], "1.2.0");
    assert_eq!(deduped.component_dependencies_map.len(), 1);
    assert_eq!(
        deduped.component_dependencies_map["s/c@1.0.0"].dependencies["lodash"],
        "^2.0.0"
    );
}

#[test]
fn test_tie_goes_to_the_higher_version() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", "^1.0.0"),
        runtime("s/b@1.0.0", "lodash", "^2.0.0"),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], "2.0.0");
    assert_eq!(
        deduped.component_dependencies_map["s/a@1.0.0"].dependencies["lodash"],
        "^1.0.0"
    );
}

#[test]
fn test_differing_non_semver_ranges_are_not_hoisted() {
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", "git+https://github.com/lodash/lodash.git"),
        runtime("s/b@1.0.0", "lodash", "^4.0.0"),
    ]);
    assert!(deduped.root_dependencies.is_empty());
    assert_eq!(deduped.component_dependencies_map.len(), 2);
}

#[test]
fn test_identical_non_semver_ranges_are_hoisted() {
    let url = "https://registry.example.com/lodash-4.0.0.tgz";
    let deduped = dedupe_dependencies(&[
        runtime("s/a@1.0.0", "lodash", url),
        runtime("s/b@1.0.0", "lodash", url),
    ]);
    assert_eq!(deduped.root_dependencies.dependencies["lodash"], url);
}

#[test]
fn test_root_field_selection() {
    let deduped = dedupe_dependencies(&[
        manifest(
            "s/a@1.0.0",
            &[
                (Lifecycle::Peer, "react", "^18.0.0"),
                (Lifecycle::Dev, "jest", "^29.0.0"),
                (Lifecycle::Dev, "lodash", "^4.0.0"),
            ],
        ),
        manifest(
            "s/b@1.0.0",
            &[
                (Lifecycle::Peer, "react", "^18.0.0"),
                (Lifecycle::Peer, "jest", "^29.0.0"),
                (Lifecycle::Runtime, "lodash", "^4.0.0"),
            ],
        ),
    ]);

    let root = &deduped.root_dependencies;
    assert!(root.peer_dependencies.contains_key("react"));
    assert!(root.dev_dependencies.contains_key("jest"));
    assert!(root.dependencies.contains_key("lodash"));
}

#[test]
fn test_unmatched_usage_keeps_its_category() {
    let deduped = dedupe_dependencies(&[
        manifest("s/a@1.0.0", &[(Lifecycle::Dev, "jest", "^28.0.0")]),
        manifest("s/b@1.0.0", &[(Lifecycle::Dev, "jest", "^29.0.0")]),
        manifest("s/c@1.0.0", &[(Lifecycle::Dev, "jest", "^29.1.0")]),
    ]);
    assert_eq!(deduped.root_dependencies.dev_dependencies["jest"], "29.1.0");
    assert_eq!(
        deduped.component_dependencies_map["s/a@1.0.0"].dev_dependencies["jest"],
        "^28.0.0"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(dedupe_dependencies(&[]), DedupedDependencies::default());
}
