use verigraph_lib::application::config::AppConfig;
use verigraph_lib::graph::IssueKind;
use verigraph_lib::primitives::{ColorIntent, LogLevel};

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();
    assert!(config.log_level <= 4);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.issue_suppressions() == Default::default());
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        color: ColorIntent::Never,
        ignore_issues: vec![IssueKind::CircularDependencies],
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.color, ColorIntent::Never);
    assert!(
        merged
            .issue_suppressions()
            .suppresses(IssueKind::CircularDependencies)
    );
}

#[test]
fn test_logger_config_follows_app_config() {
    let config = AppConfig {
        log_level: 2,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Info);
    assert!(!logger_config.color);
}
