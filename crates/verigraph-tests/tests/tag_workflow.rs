//! End-to-end tagging of a batch of components
//!
//! Tag output is fed back into `validate` to prove every produced Version
//! passes the same gate on its own.

use anyhow::Result;
use serde_json::json;
use verigraph_lib::application::Commands;
use verigraph_lib::graph::IssueKind;
use verigraph_tests::TestEnvironment;
use verigraph_tests::fixtures::tag_component_json;

#[test]
fn test_cyclic_components_tag_with_circular_dependencies_ignored() -> Result<()> {
    let env = TestEnvironment::new()?.ignoring(IssueKind::CircularDependencies);
    let request = env.input(
        "request.json",
        &json!({
            "components": [
                tag_component_json("comp-a", "0.0.1", &["comp-b"]),
                tag_component_json("comp-b", "0.0.1", &["comp-a"]),
            ],
            "message": "first tag",
        }),
    )?;

    let tagged = env.run(Commands::Tag { request })?;
    let tagged = tagged["components"]
        .as_array()
        .expect("tag output lists components");
    assert_eq!(tagged.len(), 2);

    for (component, other) in [("comp-a", "comp-b"), ("comp-b", "comp-a")] {
        let entry = tagged
            .iter()
            .find(|t| t["id"]["name"] == component)
            .expect("tagged component present");
        assert_eq!(entry["id"]["version"], "0.0.1");
        let flattened = entry["version"]["flattenedDependencies"]
            .as_array()
            .expect("flattened list");
        assert_eq!(flattened.len(), 1);
        assert_eq!(flattened[0]["name"], other);

        let version = env.input(&format!("{}.json", component), &entry["version"])?;
        let report = env.run(Commands::Validate {
            version_json: version,
            owner: Some(format!("org/{}@0.0.1", component)),
        })?;
        assert_eq!(report["hash"], entry["hash"]);
    }
    Ok(())
}

#[test]
fn test_cyclic_components_are_refused_by_default() -> Result<()> {
    let env = TestEnvironment::new()?;
    let request = env.input(
        "request.json",
        &json!({
            "components": [
                tag_component_json("comp-a", "0.0.1", &["comp-b"]),
                tag_component_json("comp-b", "0.0.1", &["comp-a"]),
            ],
        }),
    )?;

    let err = env.run(Commands::Tag { request }).unwrap_err();
    assert!(err.to_string().contains("circular dependencies"));
    Ok(())
}

#[test]
fn test_chain_tags_with_latest_known_versions() -> Result<()> {
    let env = TestEnvironment::new()?;
    let request = env.input(
        "request.json",
        &json!({
            "components": [tag_component_json("app", "2.0.0", &["lib"])],
            "knownVersions": [
                {"scope": "org", "name": "lib", "version": "1.0.0"},
                {"scope": "org", "name": "lib", "version": "1.4.0"}
            ],
            "knownEdges": [
                {
                    "id": {"scope": "org", "name": "lib", "version": "1.4.0"},
                    "dependencies": [{"id": {"scope": "org", "name": "util", "version": "0.3.0"}}]
                }
            ],
        }),
    )?;

    let tagged = env.run(Commands::Tag { request })?;
    let version = &tagged["components"][0]["version"];
    assert_eq!(version["dependencies"][0]["id"]["version"], "1.4.0");
    let names: Vec<&str> = version["flattenedDependencies"]
        .as_array()
        .expect("flattened list")
        .iter()
        .filter_map(|id| id["name"].as_str())
        .collect();
    assert_eq!(names, vec!["lib", "util"]);
    Ok(())
}
