//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Base URL of the clinic REST backend, without a trailing slash.
    pub api_base_url: String,
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Quiet period applied to patient lookups before hitting the backend.
    #[serde(default = "default_lookup_debounce")]
    pub lookup_debounce_ms: u64,
}

fn default_api_timeout() -> u64 {
    10
}

fn default_lookup_debounce() -> u64 {
    250
}

/// Loads `default.yaml`, then `{app_env}.yaml` when present, then `APP__*`
/// environment variables from `config_dir`.
pub fn load_server_config(config_dir: &Path, app_env: &str) -> Result<ServerConfig, ConfigError> {
    Config::builder()
        .add_source(File::from(config_dir.join("default.yaml")).required(true))
        .add_source(File::from(config_dir.join(format!("{app_env}.yaml"))).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const DEFAULT_YAML: &str = r#"
domain: clinic.test
address: 127.0.0.1
port: 8080
api_base_url: http://localhost:9000/api
templates_dir: templates/**/*
secret: dev-secret
auth_service_url: http://auth.clinic.test
"#;

    #[test]
    fn loads_defaults_and_applies_environment_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.yaml"), DEFAULT_YAML).unwrap();
        fs::write(dir.path().join("production.yaml"), "port: 443\n").unwrap();

        let config = load_server_config(dir.path(), "production").unwrap();

        assert_eq!(config.port, 443);
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
        assert_eq!(config.lookup_debounce_ms, 250);
        assert_eq!(config.api_timeout_secs, 10);
    }

    #[test]
    fn missing_environment_file_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.yaml"), DEFAULT_YAML).unwrap();

        let config = load_server_config(dir.path(), "staging").unwrap();

        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_default_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_server_config(dir.path(), "development").is_err());
    }
}
