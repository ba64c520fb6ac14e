//! `flatten`, `dedupe` and `latest` through the command layer

use anyhow::Result;
use serde_json::json;
use verigraph_lib::application::Commands;
use verigraph_lib::graph::IssueKind;
use verigraph_tests::TestEnvironment;
use verigraph_tests::fixtures::graph_json;

#[test]
fn test_flatten_reports_self_reference_unless_ignored() -> Result<()> {
    let env = TestEnvironment::new()?;
    let graph = env.input("graph.json", &graph_json(&[("a", &["a", "b"]), ("b", &[])]))?;

    let err = env
        .run(Commands::Flatten {
            graph: graph.clone(),
            components: Vec::new(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("depends on itself"));

    let env = env.ignoring(IssueKind::SelfReference);
    let result = env.run(Commands::Flatten {
        graph,
        components: Vec::new(),
    })?;
    assert_eq!(result["issues"][0]["kind"], "SelfReference");
    assert_eq!(
        result["components"][0]["flattenedDependencies"],
        json!([{"scope": "org", "name": "b", "version": "1.0.0"}])
    );
    Ok(())
}

#[test]
fn test_flatten_chain() -> Result<()> {
    let env = TestEnvironment::new()?;
    let graph = env.input(
        "graph.json",
        &graph_json(&[("a", &["b"]), ("b", &["c"]), ("c", &["d"])]),
    )?;
    let result = env.run(Commands::Flatten {
        graph,
        components: vec!["org/a@1.0.0".to_string()],
    })?;
    assert_eq!(
        result[0]["flattenedDependencies"].as_array().map(Vec::len),
        Some(3)
    );
    assert_eq!(result[0]["directDependencies"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[test]
fn test_dedupe_keeps_unmatched_ranges_with_their_component() -> Result<()> {
    let env = TestEnvironment::new()?;
    let id = |name: &str| json!({"scope": "org", "name": name, "version": "1.0.0"});
    let manifests = env.input(
        "manifests.json",
        &json!([
            {"id": id("a"), "dependencies": {"chalk": "^5.0.0"}},
            {"id": id("b"), "dependencies": {"chalk": "^5.2.0"}},
            {"id": id("c"), "dependencies": {"chalk": "^4.0.0"}}
        ]),
    )?;
    let result = env.run(Commands::Dedupe {
        manifests,
        root: None,
    })?;
    assert_eq!(result["rootDependencies"]["dependencies"]["chalk"], "5.2.0");
    assert_eq!(
        result["componentDependenciesMap"]["org/c@1.0.0"]["dependencies"]["chalk"],
        "^4.0.0"
    );
    Ok(())
}

#[test]
fn test_latest_with_ambiguous_snaps_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    let ids = env.input(
        "ids.json",
        &json!([
            "org/a@aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d",
            "org/a@0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33"
        ]),
    )?;
    let err = env
        .run(Commands::Latest {
            ids,
            id: "org/a".to_string(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("multiple snaps"));
    Ok(())
}

#[test]
fn test_version_command_prints_text() -> Result<()> {
    let env = TestEnvironment::new()?;
    let output = env.run_raw(Commands::Version)?;
    assert!(output.starts_with("verigraph "));
    Ok(())
}
