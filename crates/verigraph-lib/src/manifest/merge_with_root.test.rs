use super::*;
use crate::manifest::DepObject;

fn deps(entries: &[(&str, &str)]) -> DepObject {
    entries
        .iter()
        .map(|(name, range)| (name.to_string(), range.to_string()))
        .collect()
}

fn deduped_with_lodash() -> DedupedDependencies {
    DedupedDependencies {
        root_dependencies: ManifestDependencies {
            dependencies: deps(&[("lodash", "4.17.21")]),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_adds_missing_root_entries() {
    let root = ManifestDependencies {
        dev_dependencies: deps(&[("typescript", "^5.0.0")]),
        ..Default::default()
    };
    let merged = merge_with_root_deps(&root, deduped_with_lodash());
    assert_eq!(
        merged.root_dependencies.dev_dependencies["typescript"],
        "^5.0.0"
    );
    assert_eq!(merged.root_dependencies.dependencies["lodash"], "4.17.21");
}

#[test]
fn test_never_overwrites_computed_entries() {
    let root = ManifestDependencies {
        dependencies: deps(&[("lodash", "^3.0.0")]),
        peer_dependencies: deps(&[("lodash", "^2.0.0")]),
        ..Default::default()
    };
    let merged = merge_with_root_deps(&root, deduped_with_lodash());
    assert_eq!(merged.root_dependencies.dependencies["lodash"], "4.17.21");
    assert!(merged.root_dependencies.peer_dependencies.is_empty());
}

#[test]
fn test_first_field_declaring_a_name_wins() {
    let root = ManifestDependencies {
        dependencies: deps(&[("react", "^18.0.0")]),
        dev_dependencies: deps(&[("react", "^17.0.0")]),
        ..Default::default()
    };
    let merged = merge_with_root_deps(&root, DedupedDependencies::default());
    assert_eq!(merged.root_dependencies.dependencies["react"], "^18.0.0");
    assert!(!merged.root_dependencies.dev_dependencies.contains_key("react"));
}

#[test]
fn test_merge_is_idempotent() {
    let root = ManifestDependencies {
        dependencies: deps(&[("lodash", "^3.0.0"), ("chalk", "^5.0.0")]),
        dev_dependencies: deps(&[("jest", "^29.0.0")]),
        peer_dependencies: deps(&[("react", "^18.0.0")]),
    };
    let once = merge_with_root_deps(&root, deduped_with_lodash());
    let twice = merge_with_root_deps(&root, once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_component_map_is_untouched() {
    let mut deduped = deduped_with_lodash();
    deduped
        .component_dependencies_map
        .insert("s/a@1.0.0".to_string(), ManifestDependencies::default());
    let root = ManifestDependencies {
        dependencies: deps(&[("chalk", "^5.0.0")]),
        ..Default::default()
    };
    let merged = merge_with_root_deps(&root, deduped.clone());
    assert_eq!(
        merged.component_dependencies_map,
        deduped.component_dependencies_map
    );
}
