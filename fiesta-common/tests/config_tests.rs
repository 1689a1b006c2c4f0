//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests:
//! - Missing config file falls back to compiled defaults
//! - Explicit path and FIESTA_CONFIG priority order
//! - Environment variable overrides applied after the file
//! - Malformed files are reported, not ignored
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.

use fiesta_common::config::{
    resolve_config_path, ConfigSource, StoreBackend, TomlConfig, ADMIN_PASSWORD_ENV_VAR, CONFIG_ENV_VAR,
    PORT_ENV_VAR, REDIS_URL_ENV_VAR,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var(CONFIG_ENV_VAR);
    env::remove_var(REDIS_URL_ENV_VAR);
    env::remove_var(ADMIN_PASSWORD_ENV_VAR);
    env::remove_var(PORT_ENV_VAR);
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_env();
    let missing = std::path::PathBuf::from("/tmp/fiesta-definitely-missing/config.toml");

    let config = TomlConfig::resolve(Some(&missing)).unwrap();

    assert_eq!(config.port, 5780);
    assert_eq!(config.store.backend, StoreBackend::Redis);
}

#[test]
#[serial]
fn test_source_reports_missing_file_for_later_logging() {
    clear_env();
    let missing = std::path::PathBuf::from("/tmp/fiesta-definitely-missing/config.toml");

    let (config, source) = TomlConfig::resolve_with_source(Some(&missing)).unwrap();

    assert_eq!(config.port, 5780);
    assert_eq!(source, ConfigSource::Missing(missing));
}

#[test]
#[serial]
fn test_source_reports_loaded_file() {
    clear_env();
    let file = write_config("port = 7003");

    let (config, source) = TomlConfig::resolve_with_source(Some(file.path())).unwrap();

    assert_eq!(config.port, 7003);
    assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
}

#[test]
#[serial]
fn test_explicit_file_is_loaded() {
    clear_env();
    let file = write_config(
        r#"
        port = 9000
        admin_password = "clave"

        [store]
        backend = "memory"
        namespace = "prueba"

        [logging]
        level = "debug"
        "#,
    );

    let config = TomlConfig::resolve(Some(file.path())).unwrap();

    assert_eq!(config.port, 9000);
    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(config.store.namespace, "prueba");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.effective_admin_password(), Some("clave"));
}

#[test]
#[serial]
fn test_env_config_path_used_without_cli() {
    clear_env();
    let file = write_config("port = 7001");
    env::set_var(CONFIG_ENV_VAR, file.path());

    assert_eq!(resolve_config_path(None), Some(file.path().to_path_buf()));
    assert_eq!(TomlConfig::resolve(None).unwrap().port, 7001);

    clear_env();
}

#[test]
#[serial]
fn test_cli_path_beats_env_path() {
    clear_env();
    let env_file = write_config("port = 7001");
    let cli_file = write_config("port = 7002");
    env::set_var(CONFIG_ENV_VAR, env_file.path());

    let config = TomlConfig::resolve(Some(cli_file.path())).unwrap();
    assert_eq!(config.port, 7002);

    clear_env();
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    env::set_var(REDIS_URL_ENV_VAR, "redis://cache:6380");
    env::set_var(ADMIN_PASSWORD_ENV_VAR, "desde-env");
    env::set_var(PORT_ENV_VAR, "8123");

    let mut config = TomlConfig::default();
    config.apply_env_overrides().unwrap();

    assert_eq!(config.store.redis_url, "redis://cache:6380");
    assert_eq!(config.effective_admin_password(), Some("desde-env"));
    assert_eq!(config.port, 8123);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_override_is_error() {
    clear_env();
    env::set_var(PORT_ENV_VAR, "no-es-un-puerto");

    let mut config = TomlConfig::default();
    assert!(config.apply_env_overrides().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_malformed_file_is_error() {
    clear_env();
    let file = write_config("port = [1, 2");

    assert!(TomlConfig::resolve(Some(file.path())).is_err());
}
