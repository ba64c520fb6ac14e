use super::*;

fn id(s: &str) -> ComponentId {
    s.parse().unwrap()
}

#[test]
fn test_string_id_prefers_extension_id() {
    let entry = ExtensionDataEntry {
        extension_id: Some(id("teambit.react/react@1.0.0")),
        name: Some("ignored".to_string()),
        ..Default::default()
    };
    assert_eq!(entry.string_id().as_deref(), Some("teambit.react/react@1.0.0"));

    let core = ExtensionDataEntry::from_name("teambit.pipelines/builder");
    assert_eq!(core.string_id().as_deref(), Some("teambit.pipelines/builder"));

    assert_eq!(ExtensionDataEntry::default().string_id(), None);
}

#[test]
fn test_duplicate_string_ids() {
    let list: ExtensionDataList = vec![
        ExtensionDataEntry::from_id(id("s/env@1.0.0")),
        ExtensionDataEntry::from_name("teambit.pkg/pkg"),
        ExtensionDataEntry::from_id(id("s/env@1.0.0")),
        ExtensionDataEntry::default(),
        ExtensionDataEntry::default(),
    ]
    .into_iter()
    .collect();

    assert_eq!(list.duplicate_string_ids(), vec!["s/env@1.0.0".to_string()]);
}

#[test]
fn test_extension_ids_skip_core_extensions() {
    let list: ExtensionDataList = vec![
        ExtensionDataEntry::from_id(id("s/env@1.0.0")),
        ExtensionDataEntry::from_name("teambit.pkg/pkg"),
    ]
    .into_iter()
    .collect();

    let ids = list.extension_ids();
    assert_eq!(ids.len(), 1);
    assert!(list.has_name("teambit.pkg/pkg"));
}

#[test]
fn test_artifact_duplicates_ignore_case() {
    let files = ArtifactFiles {
        name: "dist".to_string(),
        refs: vec![
            ArtifactRef {
                relative_path: "dist/index.js".to_string(),
                file: Ref::of(b"a"),
            },
            ArtifactRef {
                relative_path: "dist/Index.js".to_string(),
                file: Ref::of(b"b"),
            },
            ArtifactRef {
                relative_path: "dist/other.js".to_string(),
                file: Ref::of(b"c"),
            },
        ],
    };

    assert_eq!(
        files.duplicate_paths(),
        vec!["dist/index.js".to_string(), "dist/Index.js".to_string()]
    );
}
