//! Builders for engine inputs

use crate::component::{ComponentId, Log, SchemaName, SourceFile, Version};
use crate::graph::{ComponentEdges, DirectDependency, EdgeKind};
use crate::manifest::{ComponentManifest, ManifestDependencies};
use crate::tagging::{ComponentToTag, PRODUCER_VERSION, TagFile};

/// Parse an id, panicking on malformed input
pub fn concrete_id(id: &str) -> ComponentId {
    id.parse()
        .unwrap_or_else(|e| panic!("invalid fixture id {}: {}", id, e))
}

/// A Version that passes validation: one file, a log, current schema
pub fn valid_version() -> Version {
    Version {
        main_file: "index.ts".to_string(),
        files: vec![SourceFile::from_content("index.ts", b"export {};")],
        log: Some(Log {
            message: "fixture".to_string(),
            ..Default::default()
        }),
        schema: Some(SchemaName::Harmony),
        producer_version: Some(PRODUCER_VERSION),
        ..Default::default()
    }
}

/// Runtime edges from `id` to each of `dependencies`
pub fn component_edges(id: &str, dependencies: &[&str]) -> ComponentEdges {
    ComponentEdges {
        id: concrete_id(id),
        dependencies: dependencies
            .iter()
            .map(|dep| DirectDependency {
                id: concrete_id(dep),
                kind: EdgeKind::Runtime,
            })
            .collect(),
    }
}

/// A component manifest with runtime package dependencies only
pub fn manifest(id: &str, dependencies: &[(&str, &str)]) -> ComponentManifest {
    ComponentManifest {
        id: concrete_id(id),
        manifest: ManifestDependencies {
            dependencies: dependencies
                .iter()
                .map(|(name, range)| (name.to_string(), range.to_string()))
                .collect(),
            ..Default::default()
        },
    }
}

/// A component to tag with one source file and runtime component dependencies
pub fn tagged_component(id: &str, version: &str, dependencies: &[&str]) -> ComponentToTag {
    ComponentToTag {
        id: concrete_id(id),
        version: Some(
            version
                .parse()
                .unwrap_or_else(|e| panic!("invalid fixture version {}: {}", version, e)),
        ),
        main_file: "index.ts".to_string(),
        files: vec![TagFile {
            relative_path: "index.ts".to_string(),
            content: format!("// {}", id),
        }],
        dependencies: dependencies.iter().map(|dep| concrete_id(dep)).collect(),
        dev_dependencies: Vec::new(),
        peer_dependencies: Vec::new(),
        extensions: Vec::new(),
        package_dependencies: Default::default(),
        dev_package_dependencies: Default::default(),
        peer_package_dependencies: Default::default(),
        previous_head: None,
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[test]
    fn test_valid_version_passes_validation() {
        let owner = concrete_id("s/fixture@1.0.0");
        assert!(validate(&valid_version(), Some(&owner)).is_ok());
    }

    #[test]
    fn test_component_edges_are_runtime() {
        let edges = component_edges("s/a@1.0.0", &["s/b@1.0.0"]);
        assert_eq!(edges.dependencies.len(), 1);
        assert_eq!(edges.dependencies[0].kind, EdgeKind::Runtime);
    }
}
