//! HTTP protection gateway adapter.
//!
//! # Responsibilities
//! - Resolve the record owner from the provider
//! - Have the wallet sign the canonical JSON of the record
//! - Submit `{ owner, data, signature }` to the gateway
//! - Parse `{ "transactionHash": "0x…" }` from the response
//!
//! Every failure, including a declined signature, surfaces as
//! [`WalletError::Protection`]. The deadline covers the whole call, the
//! signing prompt included.

use alloy::hex;
use alloy::primitives::Address;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::ProtectionConfig;
use crate::protection::service::ProtectionService;
use crate::protection::types::{ProtectedData, ProtectionReceipt};
use crate::resilience::with_deadline;
use crate::wallet::provider::{first_account, Eip1193Provider};
use crate::wallet::types::{RpcRequest, WalletError, WalletResult};

#[derive(Debug, Serialize)]
struct ProtectRequest<'a> {
    owner: Address,
    data: &'a ProtectedData,
    signature: String,
}

/// Protection service reached through an HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpProtector {
    client: reqwest::Client,
    endpoint: Url,
    timeout_duration: Duration,
}

impl HttpProtector {
    pub fn new(config: &ProtectionConfig) -> WalletResult<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            WalletError::Protection(format!("invalid endpoint '{}': {}", config.endpoint, e))
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            timeout_duration: Duration::from_secs(config.timeout_secs),
        })
    }

    fn protect_url(&self) -> String {
        format!("{}/protect", self.endpoint.as_str().trim_end_matches('/'))
    }

    async fn submit(
        &self,
        provider: Arc<dyn Eip1193Provider>,
        data: &ProtectedData,
    ) -> WalletResult<ProtectionReceipt> {
        let owner = first_account(provider.as_ref(), "eth_accounts")
            .await?
            .ok_or_else(|| WalletError::Protection("provider exposes no account".to_string()))?;

        let message = serde_json::to_string(data)
            .map_err(|e| WalletError::Protection(format!("cannot encode record: {}", e)))?;

        tracing::debug!(owner = %owner, "Requesting payload signature");
        let signature = provider
            .request(
                RpcRequest::new("personal_sign")
                    .with_params(json!([hex::encode_prefixed(message.as_bytes()), owner.to_string()])),
            )
            .await?;
        let signature = signature
            .as_str()
            .ok_or_else(|| WalletError::InvalidResponse(format!("signature is not a string: {}", signature)))?
            .to_string();

        let url = self.protect_url();
        tracing::debug!(url = %url, "Submitting record to protection gateway");

        let response = self
            .client
            .post(&url)
            .json(&ProtectRequest { owner, data, signature })
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WalletError::Protection(format!(
                "gateway returned {}: {}",
                status,
                body.trim()
            )));
        }

        let receipt = response
            .json::<ProtectionReceipt>()
            .await
            .map_err(|e| WalletError::Protection(format!("unreadable gateway response: {}", e)))?;

        if receipt.transaction_hash.trim().is_empty() {
            return Err(WalletError::Protection(
                "gateway returned an empty transaction hash".to_string(),
            ));
        }
        Ok(receipt)
    }
}

#[async_trait]
impl ProtectionService for HttpProtector {
    async fn protect_data(
        &self,
        provider: Arc<dyn Eip1193Provider>,
        data: &ProtectedData,
    ) -> WalletResult<ProtectionReceipt> {
        let result = with_deadline(self.timeout_duration, "data protection", self.submit(provider, data)).await;

        match result {
            Ok(receipt) => {
                tracing::info!(tx_hash = %receipt.transaction_hash, "Data protected");
                Ok(receipt)
            }
            Err(WalletError::Protection(msg)) => Err(WalletError::Protection(msg)),
            Err(e) => Err(WalletError::Protection(e.to_string())),
        }
    }
}
