use super::*;
use crate::graph::IssueKind;
use crate::primitives::LogFormat;
use clap::CommandFactory;

#[test]
fn test_command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_flatten_with_ignored_issues() {
    let cli = Cli::try_parse_from([
        "verigraph",
        "--ignore-issues",
        "CircularDependencies,SelfReference",
        "flatten",
        "graph.json",
    ])
    .unwrap();
    assert_eq!(
        cli.config.ignore_issues,
        vec![IssueKind::CircularDependencies, IssueKind::SelfReference]
    );
    match cli.command {
        Some(Commands::Flatten { graph, components }) => {
            assert_eq!(graph, PathBuf::from("graph.json"));
            assert!(components.is_empty());
        }
        other => panic!("expected flatten, got {:?}", other),
    }
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "verigraph",
        "validate",
        "version.json",
        "--owner",
        "s/a@1.0.0",
        "--log-format",
        "json",
    ])
    .unwrap();
    assert_eq!(cli.config.log_format, LogFormat::Json);
    assert!(matches!(
        cli.command,
        Some(Commands::Validate { owner: Some(ref o), .. }) if o == "s/a@1.0.0"
    ));
}

#[test]
fn test_parse_validate_positional_path() {
    let cli = Cli::try_parse_from(["verigraph", "validate", "x.json"]).unwrap();
    match cli.command {
        Some(Commands::Validate {
            version_json,
            owner,
        }) => {
            assert_eq!(version_json, PathBuf::from("x.json"));
            assert_eq!(owner, None);
        }
        other => panic!("expected validate, got {:?}", other),
    }
}

#[test]
fn test_version_flag_on_subcommand() {
    let err = Cli::try_parse_from(["verigraph", "validate", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_unknown_issue_kind_is_rejected() {
    let result = Cli::try_parse_from(["verigraph", "--ignore-issues", "Nope", "version"]);
    assert!(result.is_err());
}

#[test]
fn test_issue_checking_commands() {
    let tag = Commands::Tag {
        request: PathBuf::from("req.json"),
    };
    assert!(tag.checks_issues());
    assert!(!Commands::Version.checks_issues());
}

#[test]
fn test_command_names_match_subcommands() {
    let cli = Cli::try_parse_from(["verigraph", "latest", "ids.json", "s/a"]).unwrap();
    assert_eq!(cli.command.unwrap().name(), "latest");
    assert_eq!(Commands::Version.name(), "version");
}
