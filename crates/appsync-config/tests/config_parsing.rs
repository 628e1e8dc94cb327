use std::{env, fs};

use appsync_config::ConfigError;
use appsync_config::loader::{load_config, load_config_with_default_path};

#[test]
fn config_parsing_and_env_overrides_and_validation() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("appsync.toml");

    let toml_content = r#"
[sync]
project_owner = "platform"
project_description = "synced"

[logging]
level = "debug"
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(path.to_str()).expect("should parse config");
    assert_eq!(cfg.sync.project_owner, "platform");
    assert_eq!(cfg.sync.project_description, "synced");
    assert_eq!(cfg.logging.level, "debug");

    // 2) Env override should win over file
    unsafe {
        env::set_var("APPSYNC__SYNC__PROJECT_OWNER", "ops");
    }
    let cfg_env = load_config(path.to_str()).expect("should parse config with env overrides");
    assert_eq!(cfg_env.sync.project_owner, "ops");
    unsafe {
        env::remove_var("APPSYNC__SYNC__PROJECT_OWNER");
    }

    // 3) Invalid log level should error
    let invalid_path = dir.path().join("invalid.toml");
    fs::write(&invalid_path, "[logging]\nlevel = \"loud\"\n").expect("write invalid toml");
    let err = load_config(invalid_path.to_str()).expect_err("expected validation error");
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("logging.level"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let missing = dir.path().join("absent.toml");

    let cfg = load_config_with_default_path(Some(&missing)).expect("defaults should load");
    assert_eq!(
        cfg.sync.project_description,
        "Automatically created by application sync"
    );
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn malformed_file_is_a_build_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[sync\nproject_owner = ").expect("write toml");

    let err = load_config(path.to_str()).expect_err("expected parse failure");
    assert!(matches!(err, ConfigError::Build(_)));
}
