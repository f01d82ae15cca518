//! Wallet request types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// EIP-1193: the user rejected the request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// EIP-1193: the provider does not support the method.
pub const UNSUPPORTED_METHOD_CODE: i64 = 4200;

/// An EIP-1193 `request({ method, params })` argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Value::Null,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}

/// Which acquisition path produced a provider handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderPath {
    /// Wallet injected into the page (browser extension).
    Injected,
    /// Remote wallet reached through a negotiated session.
    Session,
}

impl ProviderPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderPath::Injected => "injected",
            ProviderPath::Session => "session",
        }
    }
}

/// Coarse failure classes shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No usable wallet, or the wallet could not be reached.
    ProviderUnavailable,
    /// The user declined the connection.
    ConnectionRejected,
    /// The session negotiator never produced a pairing URI.
    UriNotGenerated,
    /// The protection call failed for any reason.
    Protection,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ProviderUnavailable => "provider_unavailable",
            ErrorKind::ConnectionRejected => "connection_rejected",
            ErrorKind::UriNotGenerated => "uri_not_generated",
            ErrorKind::Protection => "protection",
        }
    }
}

/// Errors raised while talking to wallets and the protection service.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No provider could be obtained.
    #[error("No wallet available: {0}")]
    Unavailable(String),

    /// The user declined to connect.
    #[error("Wallet connection rejected: {0}")]
    Rejected(String),

    /// The negotiator finished or gave up without emitting a pairing URI.
    #[error("Wallet session link was never generated: {0}")]
    UriNotGenerated(String),

    /// The wallet answered with an EIP-1193 error object.
    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Transport to the wallet or service failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A deadline elapsed.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// The wallet answered with something we could not interpret.
    #[error("Invalid wallet response: {0}")]
    InvalidResponse(String),

    /// The protection service rejected the request.
    #[error("Data protection failed: {0}")]
    Protection(String),
}

impl WalletError {
    /// Classify an error raised while acquiring a provider.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::Rejected(_) => ErrorKind::ConnectionRejected,
            WalletError::Rpc { code, .. } if *code == USER_REJECTED_CODE => {
                ErrorKind::ConnectionRejected
            }
            WalletError::UriNotGenerated(_) => ErrorKind::UriNotGenerated,
            WalletError::Protection(_) => ErrorKind::Protection,
            _ => ErrorKind::ProviderUnavailable,
        }
    }

    pub fn unsupported(method: &str) -> Self {
        WalletError::Rpc {
            code: UNSUPPORTED_METHOD_CODE,
            message: format!("method {} is not supported", method),
        }
    }
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let req = RpcRequest::new("eth_requestAccounts");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "method": "eth_requestAccounts" })
        );

        let req = RpcRequest::new("personal_sign").with_params(json!(["0x00", "0x01"]));
        assert_eq!(serde_json::to_value(&req).unwrap()["params"][1], "0x01");
    }

    #[test]
    fn test_error_kinds() {
        let rejected = WalletError::Rpc {
            code: USER_REJECTED_CODE,
            message: "User rejected the request.".into(),
        };
        assert_eq!(rejected.kind(), ErrorKind::ConnectionRejected);
        assert_eq!(
            WalletError::UriNotGenerated("x".into()).kind(),
            ErrorKind::UriNotGenerated
        );
        assert_eq!(
            WalletError::Transport("refused".into()).kind(),
            ErrorKind::ProviderUnavailable
        );
        assert_eq!(WalletError::unsupported("eth_sign").kind(), ErrorKind::ProviderUnavailable);
    }

    #[test]
    fn test_error_display() {
        let err = WalletError::Rpc {
            code: 4001,
            message: "denied".into(),
        };
        assert_eq!(err.to_string(), "Wallet RPC error 4001: denied");
    }
}
