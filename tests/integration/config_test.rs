use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use healthmon::core::config::{Config, Limits, ENV_PROCESSES, ENV_REPORT_PATH};
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.disks.len(), 1);
    assert!(config.memory.is_some());
    assert!(config.timeout_secs.is_none());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let config = Config {
        processes: vec!["nginx".to_string(), "postgres".to_string()],
        cpu: Some(Limits::new(60.0, 85.0)),
        timeout_secs: Some(10),
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(Some(temp_dir.path().join("absent.json").as_path())).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_empty_file_means_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "  \n").unwrap();

    assert_eq!(Config::load(Some(path.as_path())).unwrap(), Config::default());
}

#[test]
fn test_malformed_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ \"disks\": 3 }").unwrap();

    let err = Config::load(Some(path.as_path())).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_inverted_thresholds_in_file_rejected_on_validate() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "disks": [ { "path": "/", "limits": { "warning": 95, "critical": 80 } } ] }"#,
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_file_then_env_layering() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "report_path": "/srv/report.txt", "processes": ["nginx"] }"#,
    )
    .unwrap();

    let mut config = Config::load(Some(path.as_path())).unwrap();
    let env: HashMap<String, String> = [(ENV_PROCESSES.to_string(), "redis".to_string())]
        .into_iter()
        .collect();
    config.apply_env(&env).unwrap();

    assert_eq!(config.report_path, PathBuf::from("/srv/report.txt"));
    assert_eq!(config.processes, vec!["redis"]);

    let env: HashMap<String, String> = [(ENV_REPORT_PATH.to_string(), "/tmp/r.txt".to_string())]
        .into_iter()
        .collect();
    config.apply_env(&env).unwrap();
    assert_eq!(config.report_path, PathBuf::from("/tmp/r.txt"));
}
