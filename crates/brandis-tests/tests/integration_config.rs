// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Configuration Integration Tests
//!
//! Integration tests for brandis-config:
//!
//! - Loading files in every supported format
//! - Environment overrides
//! - Validation failures
//! - Building the guard and the API from a loaded file
//!
//! ## Test Categories
//!
//! - `test_load_*`: File loading
//! - `test_env_*`: Environment overrides
//! - `test_validate_*`: Validation
//! - `test_wiring_*`: Config driving the guard and the API

use std::env;
use std::fs;

use brandis_config::{BrandisConfig, ConfigError, ConfigFormat, ConfigLoader, LogFormat, LogLevel};
use brandis_core::{Decision, MatchMode, Role, Session};
use brandis_tests::prelude::*;

// =============================================================================
// Test Helpers
// =============================================================================

fn loader() -> ConfigLoader {
    ConfigLoader::new().with_env_prefix(format!("BRANDIS_IT_{}", unique_test_id().replace('-', "_")))
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_defaults() {
    let config = loader().load_or_default(None).unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.cookie.name, "token");
    assert_eq!(config.cookie.max_age_days, 7);
    assert_eq!(config.guard.login_path, "/");
    assert_eq!(config.guard.unauthorized_path, "/unauthorized");
    assert_eq!(config.guard.match_mode, MatchMode::Prefix);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_load_yaml_file() {
    let dir = temp_test_dir("config-yaml");
    let path = dir.path().join("brandis.yaml");
    fs::write(
        &path,
        r#"
server:
  port: 8088
cookie:
  name: brandis_token
  secure: true
guard:
  match_mode: exact
session:
  storage_path: state/session.json
logging:
  level: debug
  format: json
"#,
    )
    .unwrap();

    let config = loader().load(&path).unwrap();

    assert_eq!(config.server.port, 8088);
    assert_eq!(config.cookie.name, "brandis_token");
    assert!(config.cookie.secure);
    assert_eq!(config.guard.match_mode, MatchMode::Exact);
    assert_eq!(config.session.storage_path, dir.path().join("state/session.json"));
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_toml_and_json_agree() {
    let toml = r#"
[server]
port = 4100

[guard]
match_mode = "exact"
"#;
    let json = r#"{ "server": { "port": 4100 }, "guard": { "match_mode": "exact" } }"#;

    let from_toml = loader().load_from_str(toml, ConfigFormat::Toml).unwrap();
    let from_json = loader().load_from_str(json, ConfigFormat::Json).unwrap();

    assert_eq!(from_toml.server.port, from_json.server.port);
    assert_eq!(from_toml.guard.match_mode, from_json.guard.match_mode);
}

#[test]
fn test_load_missing_file() {
    let dir = temp_test_dir("config-missing");
    let err = loader().load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_load_unknown_field_rejected() {
    let err = loader()
        .load_from_str("cookie:\n  nmae: token\n", ConfigFormat::Yaml)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Serialization { .. }));
}

// =============================================================================
// Environment Tests
// =============================================================================

#[test]
fn test_env_overrides_file_values() {
    let prefix = "BRANDIS_IT_ENV";
    env::set_var(format!("{prefix}_PORT"), "9300");
    env::set_var(format!("{prefix}_MATCH_MODE"), "exact");
    env::set_var(format!("{prefix}_COOKIE_NAME"), "sid");

    let config = ConfigLoader::new()
        .with_env_prefix(prefix)
        .load_from_str("server:\n  port: 8000\n", ConfigFormat::Yaml)
        .unwrap();

    env::remove_var(format!("{prefix}_PORT"));
    env::remove_var(format!("{prefix}_MATCH_MODE"));
    env::remove_var(format!("{prefix}_COOKIE_NAME"));

    assert_eq!(config.server.port, 9300);
    assert_eq!(config.guard.match_mode, MatchMode::Exact);
    assert_eq!(config.cookie.name, "sid");
}

#[test]
fn test_env_invalid_match_mode() {
    let prefix = "BRANDIS_IT_BADMODE";
    env::set_var(format!("{prefix}_MATCH_MODE"), "fuzzy");

    let err = ConfigLoader::new()
        .with_env_prefix(prefix)
        .load_or_default(None)
        .unwrap_err();

    env::remove_var(format!("{prefix}_MATCH_MODE"));
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref name, .. } if name == "BRANDIS_IT_BADMODE_MATCH_MODE"));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_validate_rejects_bad_values() {
    let cases = [
        "server:\n  port: 0\n",
        "cookie:\n  name: \"\"\n",
        "cookie:\n  max_age_days: 0\n",
        "guard:\n  login_path: login\n",
        "guard:\n  login_path: /same\n  unauthorized_path: /same\n",
        "session:\n  storage_key: \"\"\n",
    ];
    for yaml in cases {
        let err = loader().load_from_str(yaml, ConfigFormat::Yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { .. }),
            "expected validation error for {:?}, got {:?}",
            yaml,
            err
        );
    }
}

// =============================================================================
// Wiring Tests
// =============================================================================

#[test]
fn test_wiring_guard_follows_config() {
    let config = loader()
        .load_from_str(
            "guard:\n  login_path: /masuk\n  match_mode: exact\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
    let guard = config.guard.build_guard();

    assert_eq!(
        guard.authorize("/products", &Session::empty()),
        Decision::RedirectTo("/masuk".into())
    );

    let pemasaran = Session::from_credential(CredentialFixtures::for_role(Role::Pemasaran));
    assert!(guard
        .authorize("/inventory/stockManagement/1", &pemasaran)
        .is_allow());
}

#[tokio::test]
async fn test_wiring_api_uses_loaded_cookie_name() {
    let config: BrandisConfig = loader()
        .load_from_str("cookie:\n  name: brandis_sid\n", ConfigFormat::Yaml)
        .unwrap();
    let app = TestApp::with_config(&config);

    let credential = CredentialFixtures::for_role(Role::Bendahara);
    app.get("/financialReports", Some(&credential))
        .await
        .assert_ok();
}
