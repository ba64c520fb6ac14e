//! JSON inputs shared by the end-to-end tests

use serde_json::{Value, json};

/// Object form of a component id
pub fn id_json(scope: &str, name: &str, version: Option<&str>) -> Value {
    match version {
        Some(version) => json!({"scope": scope, "name": name, "version": version}),
        None => json!({"scope": scope, "name": name}),
    }
}

/// A component to tag depending on versionless siblings
pub fn tag_component_json(name: &str, version: &str, dependencies: &[&str]) -> Value {
    json!({
        "id": id_json("org", name, None),
        "version": version,
        "mainFile": "index.ts",
        "files": [
            {"relativePath": "index.ts", "content": format!("export * from './{}';", name)},
            {"relativePath": format!("{}.ts", name), "content": format!("export const {} = 1;", name)}
        ],
        "dependencies": dependencies
            .iter()
            .map(|dep| id_json("org", dep, None))
            .collect::<Vec<_>>(),
    })
}

/// Graph of runtime edges, every node at 1.0.0
pub fn graph_json(edges: &[(&str, &[&str])]) -> Value {
    Value::Array(
        edges
            .iter()
            .map(|(name, dependencies)| {
                json!({
                    "id": id_json("org", name, Some("1.0.0")),
                    "dependencies": dependencies
                        .iter()
                        .map(|dep| json!({"id": id_json("org", dep, Some("1.0.0"))}))
                        .collect::<Vec<_>>(),
                })
            })
            .collect(),
    )
}
