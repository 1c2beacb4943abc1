use std::time::Duration;

use poliza_cli::config::{
    DEFAULT_TIMEOUT_SECS, PolizaConfig, load_config, load_or_default, migrate, save_config,
};
use serde_json::json;

#[test]
fn v0_config_is_migrated_to_current() {
    let v0 = json!({
        "api_url": "https://polizas.example.com/api",
        "created_at": "2024-01-20T10:00:00Z"
    });
    let migrated = migrate(v0, 0).unwrap();

    assert_eq!(migrated["config_version"], 2);
    assert_eq!(migrated["backend_url"], "https://polizas.example.com/api");
    assert!(migrated.get("api_url").is_none());
    assert_eq!(migrated["request_timeout_secs"], DEFAULT_TIMEOUT_SECS);
}

#[test]
fn v1_config_gains_timeout_and_keeps_fields() {
    let v1 = json!({
        "config_version": 1,
        "backend_url": "http://localhost:3000/api",
        "created_at": "2024-01-20T10:00:00Z"
    });
    let config: PolizaConfig = serde_json::from_value(migrate(v1, 1).unwrap()).unwrap();
    assert_eq!(config.config_version, 2);
    assert_eq!(config.backend_url, "http://localhost:3000/api");
    assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn existing_timeout_survives_migration() {
    let v1 = json!({
        "config_version": 1,
        "backend_url": "http://localhost:3000/api",
        "request_timeout_secs": 15,
        "created_at": "2024-01-20T10:00:00Z"
    });
    assert_eq!(migrate(v1, 1).unwrap()["request_timeout_secs"], 15);
}

#[test]
fn newer_config_is_refused() {
    let err = migrate(json!({"config_version": 9}), 9).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_refused() {
    assert!(migrate(json!(["not", "an", "object"]), 0).is_err());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = PolizaConfig {
        config_version: 0,
        backend_url: "https://polizas.example.com/api".to_string(),
        request_timeout_secs: 30,
        created_at: "2024-01-20T10:00:00Z".parse().unwrap(),
    };
    save_config(dir.path(), &config).unwrap();

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded.config_version, 2);
    assert_eq!(loaded.backend_url, config.backend_url);
    assert_eq!(loaded.created_at, config.created_at);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn legacy_file_on_disk_loads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"api_url": "http://10.0.0.5:3000/api"}"#,
    )
    .unwrap();

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded.backend_url, "http://10.0.0.5:3000/api");
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(dir.path()).unwrap();
    assert_eq!(config.backend_url, "http://localhost:3000/api");
}

#[test]
fn override_url_wins_over_file() {
    let config = PolizaConfig {
        request_timeout_secs: 7,
        ..PolizaConfig::default()
    };

    let settings = config.backend(Some("https://staging.example.com/api"));
    assert_eq!(settings.base_url, "https://staging.example.com/api");
    assert_eq!(settings.timeout, Duration::from_secs(7));

    assert_eq!(config.backend(Some("  ")).base_url, config.backend_url);
    assert_eq!(config.backend(None).base_url, config.backend_url);
}
