//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, chain id set)
//! - Check that URLs parse before anything tries to use them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let wc = &config.wallet_connect;
    if wc.project_id.trim().is_empty() {
        errors.push(ValidationError::new("wallet_connect.project_id", "must not be empty"));
    }
    if wc.chain_id == 0 {
        errors.push(ValidationError::new("wallet_connect.chain_id", "must be non-zero"));
    }
    if wc.uri_timeout_secs == 0 {
        errors.push(ValidationError::new("wallet_connect.uri_timeout_secs", "must be > 0"));
    }

    if let Err(e) = Url::parse(&config.deep_link.base_url) {
        errors.push(ValidationError::new(
            "deep_link.base_url",
            format!("invalid URL '{}': {}", config.deep_link.base_url, e),
        ));
    }

    if let Err(e) = Url::parse(&config.protection.endpoint) {
        errors.push(ValidationError::new(
            "protection.endpoint",
            format!("invalid URL '{}': {}", config.protection.endpoint, e),
        ));
    }
    if config.protection.timeout_secs == 0 {
        errors.push(ValidationError::new("protection.timeout_secs", "must be > 0"));
    }

    if let Some(rpc_url) = &config.wallet.rpc_url {
        if let Err(e) = Url::parse(rpc_url) {
            errors.push(ValidationError::new(
                "wallet.rpc_url",
                format!("invalid URL '{}': {}", rpc_url, e),
            ));
        }
    }
    if config.wallet.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("wallet.rpc_timeout_secs", "must be > 0"));
    }

    if config.payload.email.trim().is_empty() && config.payload.telegram_id.trim().is_empty() {
        errors.push(ValidationError::new("payload", "at least one field must be set"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
