use super::*;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.ignore_issues.is_empty());
}

#[test]
fn test_config_merging() {
    let base = AppConfig {
        ignore_issues: vec![IssueKind::SelfReference],
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.log_output, LogOutput::Stderr);
    assert_eq!(merged.ignore_issues, vec![IssueKind::SelfReference]);
}

#[test]
fn test_issue_suppressions_from_config() {
    let config = AppConfig {
        ignore_issues: vec![IssueKind::CircularDependencies],
        ..AppConfig::default()
    };
    let suppressions = config.issue_suppressions();
    assert!(suppressions.suppresses(IssueKind::CircularDependencies));
    assert!(!suppressions.suppresses(IssueKind::SelfReference));
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let missing = tempfile::tempdir().unwrap().path().join("missing");
    let mut config = AppConfig {
        workdir: Some(missing),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}

#[test]
fn test_validate_dedupes_ignored_issues() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig {
        workdir: Some(dir.path().to_path_buf()),
        ignore_issues: vec![
            IssueKind::SelfReference,
            IssueKind::CircularDependencies,
            IssueKind::SelfReference,
        ],
        ..AppConfig::default()
    };
    config.validate().unwrap();
    assert_eq!(
        config.ignore_issues,
        vec![IssueKind::CircularDependencies, IssueKind::SelfReference]
    );
}

#[test]
fn test_relative_paths_resolve_against_workdir() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/work")),
        ..AppConfig::default()
    };
    assert_eq!(
        config.resolve_path(std::path::Path::new("graph.json")),
        PathBuf::from("/work/graph.json")
    );
    assert_eq!(
        config.resolve_path(std::path::Path::new("/abs/graph.json")),
        PathBuf::from("/abs/graph.json")
    );
}
