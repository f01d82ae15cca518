//! JSON-RPC wallet reached over HTTP.
//!
//! # Responsibilities
//! - Relay EIP-1193 requests to a wallet endpoint (e.g. a node with unlocked accounts)
//! - Enforce a deadline on every call
//! - Keep the wallet's error code so a user rejection stays distinguishable

use alloy::providers::{Provider, RootProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;
use std::time::Duration;

use crate::resilience::with_deadline;
use crate::wallet::provider::Eip1193Provider;
use crate::wallet::types::{RpcRequest, WalletError, WalletResult};

/// Wallet provider backed by a JSON-RPC endpoint.
#[derive(Clone)]
pub struct RpcWallet {
    provider: RootProvider,
    rpc_url: url::Url,
    timeout_duration: Duration,
}

impl RpcWallet {
    /// Create a client for `rpc_url`. Nothing is sent until the first request.
    pub fn new(rpc_url: &str, timeout_duration: Duration) -> WalletResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| WalletError::Unavailable(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        tracing::info!(rpc_url = %url, "JSON-RPC wallet configured");

        Ok(Self {
            provider: RootProvider::new_http(url.clone()),
            rpc_url: url,
            timeout_duration,
        })
    }

    pub fn rpc_url(&self) -> &url::Url {
        &self.rpc_url
    }
}

#[async_trait]
impl Eip1193Provider for RpcWallet {
    async fn request(&self, request: RpcRequest) -> WalletResult<Value> {
        let RpcRequest { method, params } = request;
        let params = if params.is_null() { Value::Array(Vec::new()) } else { params };

        tracing::debug!(method = %method, "Forwarding wallet request");

        with_deadline(self.timeout_duration, "wallet request", async move {
            self.provider
                .raw_request::<Value, Value>(Cow::Owned(method), params)
                .await
                .map_err(|e| match e.as_error_resp() {
                    Some(payload) => WalletError::Rpc {
                        code: payload.code,
                        message: payload.message.to_string(),
                    },
                    None => WalletError::Transport(e.to_string()),
                })
        })
        .await
    }
}

impl std::fmt::Debug for RpcWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWallet")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
