use super::*;
use crate::graph::IssueKind;
use serde_json::{Value, json};
use std::path::PathBuf;

struct Workspace {
    dir: tempfile::TempDir,
    config: AppConfig,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            workdir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        Self { dir, config }
    }

    fn write(&self, name: &str, value: &Value) -> PathBuf {
        std::fs::write(self.dir.path().join(name), value.to_string()).unwrap();
        PathBuf::from(name)
    }

    fn run(&self, command: Commands) -> Result<Value> {
        let mut out = Vec::new();
        execute_command_with_config(command, &self.config, &mut out)?;
        Ok(serde_json::from_slice(&out)?)
    }
}

fn id(scope: &str, name: &str, version: &str) -> Value {
    json!({"scope": scope, "name": name, "version": version})
}

fn cyclic_graph() -> Value {
    json!([
        {"id": id("s", "a", "1.0.0"), "dependencies": [{"id": id("s", "b", "1.0.0")}]},
        {"id": id("s", "b", "1.0.0"), "dependencies": [{"id": id("s", "a", "1.0.0")}]}
    ])
}

// ===== VALIDATE =====

mod handle_validate_tests {
    use super::*;

    #[test]
    fn it_reports_a_valid_version() {
        let ws = Workspace::new();
        let version = ws.write(
            "version.json",
            &json!({
                "mainFile": "index.ts",
                "files": [{"relativePath": "index.ts", "name": "index.ts", "file": "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"}],
                "log": {"message": "init"},
                "schema": "1.0.0"
            }),
        );
        let report = ws
            .run(Commands::Validate {
                version_json: version,
                owner: Some("s/a@1.0.0".to_string()),
            })
            .unwrap();
        assert_eq!(report["valid"], true);
        assert_eq!(report["hash"].as_str().unwrap().len(), 40);
    }

    #[test]
    fn it_fails_on_an_invalid_version() {
        let ws = Workspace::new();
        let version = ws.write("version.json", &json!({"files": []}));
        let err = ws
            .run(Commands::Validate {
                version_json: version,
                owner: None,
            })
            .unwrap_err();
        assert!(err.to_string().contains("the mainFile is missing"));
    }

    #[test]
    fn it_reports_unreadable_input() {
        let ws = Workspace::new();
        let err = ws
            .run(Commands::Validate {
                version_json: PathBuf::from("missing.json"),
                owner: None,
            })
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}

// ===== FLATTEN =====

mod handle_flatten_tests {
    use super::*;

    #[test]
    fn it_blocks_on_cycles_by_default() {
        let ws = Workspace::new();
        let graph = ws.write("graph.json", &cyclic_graph());
        let err = ws
            .run(Commands::Flatten {
                graph,
                components: Vec::new(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("circular dependencies"));
    }

    #[test]
    fn it_flattens_cycles_when_ignored() {
        let mut ws = Workspace::new();
        ws.config.ignore_issues = vec![IssueKind::CircularDependencies];
        let graph = ws.write("graph.json", &cyclic_graph());
        let result = ws
            .run(Commands::Flatten {
                graph,
                components: Vec::new(),
            })
            .unwrap();
        let components = result["components"].as_array().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(
            components[0]["flattenedDependencies"],
            json!([id("s", "b", "1.0.0")])
        );
        assert_eq!(result["issues"][0]["kind"], "CircularDependencies");
    }

    #[test]
    fn it_flattens_only_requested_components() {
        let ws = Workspace::new();
        let graph = ws.write(
            "graph.json",
            &json!([
                {"id": id("s", "a", "1.0.0"), "dependencies": [{"id": id("s", "b", "1.0.0")}]},
                {"id": id("s", "b", "1.0.0"), "dependencies": [{"id": id("s", "c", "1.0.0")}]}
            ]),
        );
        let result = ws
            .run(Commands::Flatten {
                graph,
                components: vec!["s/a@1.0.0".to_string()],
            })
            .unwrap();
        let components = result.as_array().unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(
            components[0]["flattenedDependencies"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }
}

mod handle_flatten_subset_tests {
    use super::*;

    #[test]
    fn it_blocks_a_cyclic_subset_by_default() {
        let ws = Workspace::new();
        let graph = ws.write("graph.json", &cyclic_graph());
        let err = ws
            .run(Commands::Flatten {
                graph,
                components: vec!["s/a@1.0.0".to_string()],
            })
            .unwrap_err();
        assert!(err.to_string().contains("circular dependencies"));
    }

    #[test]
    fn it_rejects_components_missing_from_the_graph() {
        let ws = Workspace::new();
        let graph = ws.write("graph.json", &cyclic_graph());
        let err = ws
            .run(Commands::Flatten {
                graph,
                components: vec!["s/z@1.0.0".to_string()],
            })
            .unwrap_err();
        assert!(err.to_string().contains("s/z@1.0.0 is not part of the graph"));
    }

    #[test]
    fn it_returns_the_subset_of_a_suppressed_cycle() {
        let mut ws = Workspace::new();
        ws.config.ignore_issues = vec![IssueKind::CircularDependencies];
        let graph = ws.write("graph.json", &cyclic_graph());
        let result = ws
            .run(Commands::Flatten {
                graph,
                components: vec!["s/b@1.0.0".to_string()],
            })
            .unwrap();
        let components = result.as_array().unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0]["id"], id("s", "b", "1.0.0"));
        assert_eq!(
            components[0]["flattenedDependencies"],
            json!([id("s", "a", "1.0.0")])
        );
    }
}

// ===== DEDUPE =====

mod handle_dedupe_tests {
    use super::*;

    #[test]
    fn it_hoists_and_merges_root() {
        let ws = Workspace::new();
        let manifests = ws.write(
            "manifests.json",
            &json!([
                {"id": id("s", "a", "1.0.0"), "dependencies": {"lodash": "^4.17.0"}},
                {"id": id("s", "b", "1.0.0"), "dependencies": {"lodash": "^4.17.0"}}
            ]),
        );
        let root = ws.write("root.json", &json!({"devDependencies": {"jest": "^29.0.0"}}));
        let result = ws
            .run(Commands::Dedupe {
                manifests,
                root: Some(root),
            })
            .unwrap();
        assert_eq!(
            result["rootDependencies"]["dependencies"]["lodash"],
            "^4.17.0"
        );
        assert_eq!(
            result["rootDependencies"]["devDependencies"]["jest"],
            "^29.0.0"
        );
    }
}

// ===== LATEST =====

mod handle_latest_tests {
    use super::*;

    #[test]
    fn it_resolves_the_highest_tag() {
        let ws = Workspace::new();
        let ids = ws.write("ids.json", &json!(["s/a@0.0.9", "s/a@0.0.10", "s/b@5.0.0"]));
        let result = ws
            .run(Commands::Latest {
                ids,
                id: "s/a".to_string(),
            })
            .unwrap();
        assert_eq!(result, "s/a@0.0.10");
    }
}

// ===== TAG =====

mod handle_tag_tests {
    use super::*;

    fn cyclic_request() -> Value {
        let component = |name: &str, dep: &str| {
            json!({
                "id": {"scope": "s", "name": name},
                "version": "0.0.1",
                "mainFile": "index.ts",
                "files": [{"relativePath": "index.ts", "content": format!("// {}", name)}],
                "dependencies": [{"scope": "s", "name": dep}]
            })
        };
        json!({"components": [component("a", "b"), component("b", "a")], "message": "tag"})
    }

    #[test]
    fn it_tags_a_cyclic_batch_when_cycles_are_ignored() {
        let mut ws = Workspace::new();
        ws.config.ignore_issues = vec![IssueKind::CircularDependencies];
        let request = ws.write("request.json", &cyclic_request());
        let result = ws.run(Commands::Tag { request }).unwrap();
        let tagged = result["components"].as_array().unwrap();
        assert_eq!(tagged.len(), 2);
        assert_eq!(tagged[0]["version"]["dependencies"][0]["id"]["version"], "0.0.1");
    }

    #[test]
    fn it_hoists_the_package_requests_of_the_batch() {
        let ws = Workspace::new();
        let component = |name: &str, range: &str| {
            json!({
                "id": {"scope": "s", "name": name},
                "version": "1.0.0",
                "mainFile": "index.ts",
                "files": [{"relativePath": "index.ts", "content": name}],
                "packageDependencies": {"lodash": range}
            })
        };
        let request = ws.write(
            "request.json",
            &json!({"components": [component("a", "^4.0.0"), component("b", "^4.2.0")], "message": "tag"}),
        );
        let result = ws.run(Commands::Tag { request }).unwrap();
        assert_eq!(
            result["dependencies"]["rootDependencies"]["dependencies"]["lodash"],
            "4.2.0"
        );
        assert_eq!(result["dependencies"]["componentDependenciesMap"], json!({}));
    }

    #[test]
    fn it_refuses_a_cyclic_batch_by_default() {
        let ws = Workspace::new();
        let request = ws.write("request.json", &cyclic_request());
        assert!(ws.run(Commands::Tag { request }).is_err());
    }
}

// ===== VERSION =====

#[test]
fn test_version_prints_package_version() {
    let ws = Workspace::new();
    let mut out = Vec::new();
    execute_command_with_config(Commands::Version, &ws.config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("verigraph "));
}
