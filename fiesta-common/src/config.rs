//! Configuration loading and resolution
//!
//! Bootstrap configuration is read once at startup from a TOML file and can
//! be overridden afterwards by environment variables and command-line flags.
//!
//! Config file priority order:
//! 1. Command-line argument (highest priority)
//! 2. `FIESTA_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/fiesta/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is not an error: a warning is logged and the
//! compiled defaults are used. A config file that exists but does not parse
//! is reported as [`Error::Config`].

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FIESTA_CONFIG";
/// Environment variable overriding the Redis URL
pub const REDIS_URL_ENV_VAR: &str = "FIESTA_REDIS_URL";
/// Environment variable overriding the admin password
pub const ADMIN_PASSWORD_ENV_VAR: &str = "FIESTA_ADMIN_PASSWORD";
/// Environment variable overriding the HTTP port
pub const PORT_ENV_VAR: &str = "FIESTA_PORT";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Admin panel password. `None` (or empty) disables admin authentication.
    #[serde(default)]
    pub admin_password: Option<String>,

    /// Key-value store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which key-value store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

/// Key-value store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Redis connection URL (ignored by the memory backend)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Prefix for every key written by the roster
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5780
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_namespace() -> String {
    "fiesta".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            redis_url: default_redis_url(),
            namespace: default_namespace(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            admin_password: None,
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config file and load it, falling back to defaults
    ///
    /// `cli_path` takes priority over [`CONFIG_ENV_VAR`], which takes priority
    /// over the platform config directory.
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        let (config, source) = Self::resolve_with_source(cli_path)?;
        source.log();
        Ok(config)
    }

    /// Same as [`TomlConfig::resolve`] but without logging; the caller logs
    /// the returned [`ConfigSource`] once tracing is up
    pub fn resolve_with_source(cli_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        match resolve_config_path(cli_path) {
            Some(path) if path.exists() => Ok((Self::load(&path)?, ConfigSource::File(path))),
            Some(path) => Ok((Self::default(), ConfigSource::Missing(path))),
            None => Ok((Self::default(), ConfigSource::NoLocation)),
        }
    }

    /// Apply environment variable overrides on top of the file values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(REDIS_URL_ENV_VAR) {
            self.store.redis_url = url;
        }
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV_VAR) {
            self.admin_password = Some(password);
        }
        if let Ok(port) = std::env::var(PORT_ENV_VAR) {
            self.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid {}: {}", PORT_ENV_VAR, e)))?;
        }
        Ok(())
    }

    /// Admin password with empty values treated as "not configured"
    pub fn effective_admin_password(&self) -> Option<&str> {
        self.admin_password
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file was selected but does not exist; defaults used
    Missing(PathBuf),
    /// No candidate path at all; defaults used
    NoLocation,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                info!("Loaded configuration from {}", path.display());
            }
            ConfigSource::Missing(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
            }
            ConfigSource::NoLocation => {
                warn!("No config file location available, using compiled defaults");
            }
        }
    }
}

/// Determine which config file path applies, without touching its contents
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|d| d.join("fiesta").join("config.toml"))
}
