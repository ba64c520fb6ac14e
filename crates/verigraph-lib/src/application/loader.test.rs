use super::*;
use crate::primitives::ColorIntent;
use std::fs;

#[test]
fn test_missing_env_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_env_files(dir.path()).is_ok());
}

#[test]
fn test_env_file_values_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".env"),
        "VERIGRAPH_LOADER_TEST_MARKER=from-dotenv\n",
    )
    .unwrap();
    load_env_files(dir.path()).unwrap();
    assert_eq!(
        std::env::var("VERIGRAPH_LOADER_TEST_MARKER").unwrap(),
        "from-dotenv"
    );
}

#[test]
fn test_malformed_env_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env.local"), "NOT A VALID LINE\n").unwrap();
    assert!(matches!(
        load_env_files(dir.path()),
        Err(ConfigError::EnvFileError { .. })
    ));
}

#[test]
fn test_cli_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cli = AppConfig {
        workdir: Some(dir.path().to_path_buf()),
        log_level: 3,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let config = AppConfig::load(cli).unwrap();
    assert_eq!(config.log_level, 3);
    assert_eq!(config.color, ColorIntent::Never);
    assert_eq!(config.workdir.as_deref(), Some(dir.path()));
}
