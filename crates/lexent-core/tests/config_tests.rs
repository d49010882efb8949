use std::fs;

use lexent_core::config::{Config, ConfigError, DEFAULT_ENGINE_STRATEGY, DEFAULT_LANGUAGE};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.engine.strategy, DEFAULT_ENGINE_STRATEGY);
    assert!(config.engine.path.is_none());
    assert!(config.engine.dist_dir.is_none());
    assert_eq!(config.parser.default_language, DEFAULT_LANGUAGE);
}

#[test]
fn test_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lexent.toml");
    fs::write(
        &path,
        r#"
[engine]
strategy = "direct"
path = "/opt/lexent/liblexent_engine.so"

[parser]
default_language = "FR"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.engine.strategy, "direct");
    assert!(config.engine.path.is_some());
    assert_eq!(config.parser.default_language, "FR");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lexent.toml");
    fs::write(&path, "[parser]\ndefault_language = \"DE\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.engine.strategy, DEFAULT_ENGINE_STRATEGY);
    assert_eq!(config.parser.default_language, "DE");
}

#[test]
fn test_unknown_strategy_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lexent.toml");
    fs::write(&path, "[engine]\nstrategy = \"carrier-pigeon\"\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unreadable_file_is_read_error() {
    let err = Config::from_file("/nonexistent/lexent.toml").unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}

#[test]
fn test_env_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lexent.toml");
    fs::write(&path, "[engine]\ndist_dir = \"/opt/dist\"\n").unwrap();

    std::env::set_var("LEXENT_ENGINE_DIST_DIR", "/srv/lexent-dist");
    let config = Config::from_file(&path).unwrap();
    std::env::remove_var("LEXENT_ENGINE_DIST_DIR");

    assert_eq!(
        config.engine.dist_dir.as_deref(),
        Some(std::path::Path::new("/srv/lexent-dist"))
    );
}
