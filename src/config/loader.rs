//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AdminConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AdminConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AdminConfig, ConfigError> {
    let config: AdminConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        [rpc]
        endpoints = ["http://127.0.0.1:8003"]
        node_id = "console-1"
        secret = "s3cret"

        [[auth.admins]]
        id = 1
        username = "admin"
        api_key = "admin-key"
    "#;

    #[test]
    fn test_load_minimal_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.rpc.node_id, "console-1");
        assert_eq!(config.rpc.timeout_secs, 30);
        assert_eq!(config.auth.admins[0].api_key, "admin-key");
        assert_eq!(config.listener.bind_address, "0.0.0.0:7788");
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = parse_config("[rpc]\nendpoints = []\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.contains(&ValidationError::NoEndpoints));
                assert!(errors.contains(&ValidationError::NoAdmins));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = parse_config(include_str!("../../configs/edge-admin.example.toml")).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:7788");
        assert!(config.listener.tls.is_none());
        assert_eq!(config.auth.admins.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
