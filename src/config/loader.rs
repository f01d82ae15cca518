//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a configuration assembled in code (e.g. after CLI overrides).
pub fn check_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    check_config(&config)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[wallet_connect\nchain_id = 1").unwrap_err();
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_validation_error_listed() {
        let err = parse_config("[protection]\ntimeout_secs = 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: protection.timeout_secs: must be > 0"
        );
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join("miniapp_protect_loader_test.toml");
        fs::write(&path, "[wallet_connect]\nchain_id = 1\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.wallet_connect.chain_id, 1);

        fs::remove_file(&path).unwrap_or_default();
    }
}
