//! Configuration module unit tests

use graphlab_cli::config::Config;
use graphlab_core::Heuristic;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.analytics.pagerank.iterations, 50);
    assert_eq!(config.analytics.pagerank.damping, 0.85);
    assert_eq!(config.analytics.community.max_passes, 10);
    assert_eq!(config.analytics.paths.k, 3);
    assert_eq!(config.analytics.paths.max_paths, 10);
    assert!(!config.output.json);
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.analytics.pagerank.damping = 0.5;
    config.analytics.paths.k = 7;
    config.analytics.paths.heuristic = Heuristic::Zero;
    config.output.json = true;

    config.save(&config_path).unwrap();
    assert!(config_path.exists());

    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(loaded.analytics, config.analytics);
    assert!(loaded.output.json);
}

#[test]
fn test_config_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[pagerank]
iterations = 5

[paths]
heuristic = "zero"
"#,
    )
    .unwrap();

    let config = Config::load(config_path.to_str()).unwrap();
    assert_eq!(config.analytics.pagerank.iterations, 5);
    assert_eq!(config.analytics.pagerank.damping, 0.85);
    assert_eq!(config.analytics.paths.heuristic, Heuristic::Zero);
    assert_eq!(config.analytics.paths.k, 3);
}

#[test]
fn test_config_missing_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let err = Config::load(missing.to_str()).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_config_rejects_invalid_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[pagerank]\ndamping = 1.5\n").unwrap();

    let err = Config::load_from(&config_path).unwrap_err();
    assert!(err.to_string().contains("invalid config file"));
}

#[test]
fn test_config_rejects_malformed_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[pagerank\niterations = ").unwrap();

    assert!(Config::load_from(&config_path).is_err());
}

#[test]
fn test_default_path_location() {
    let path = Config::default_path();
    assert!(path.ends_with("graphlab/config.toml"));
}
