//! Local key wallet acting as an injected provider.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::hex;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::wallet::provider::Eip1193Provider;
use crate::wallet::types::{RpcRequest, WalletError, WalletResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "MINIAPP_WALLET_PRIVATE_KEY";

/// In-process wallet that answers the EIP-1193 subset the mini app uses.
#[derive(Debug, Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl LocalWallet {
    /// Create a wallet from a hex-encoded private key string (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> WalletResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::Unavailable(format!("Invalid private key format: {}", e)))?;

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Local wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Load wallet from `MINIAPP_WALLET_PRIVATE_KEY`.
    pub fn from_env(chain_id: u64) -> WalletResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            WalletError::Unavailable(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, chain_id)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `personal_sign` takes `[data, address]`; data is hex or plain text.
    async fn personal_sign(&self, params: &Value) -> WalletResult<Value> {
        let data = params
            .get(0)
            .and_then(Value::as_str)
            .ok_or_else(|| WalletError::InvalidResponse("personal_sign needs a data argument".into()))?;

        if let Some(requested) = params.get(1).and_then(Value::as_str) {
            let requested: Address = requested
                .parse()
                .map_err(|e| WalletError::InvalidResponse(format!("invalid signer address: {}", e)))?;
            if requested != self.address() {
                return Err(WalletError::Rpc {
                    code: 4100,
                    message: format!("account {} is not managed by this wallet", requested),
                });
            }
        }

        let message = match data.strip_prefix("0x") {
            Some(stripped) => hex::decode(stripped)
                .map_err(|e| WalletError::InvalidResponse(format!("invalid hex payload: {}", e)))?,
            None => data.as_bytes().to_vec(),
        };

        let signature = self
            .signer
            .sign_message(&message)
            .await
            .map_err(|e| WalletError::Rpc {
                code: -32603,
                message: format!("Message signing failed: {}", e),
            })?;

        Ok(Value::String(hex::encode_prefixed(signature.as_bytes())))
    }
}

#[async_trait]
impl Eip1193Provider for LocalWallet {
    async fn request(&self, request: RpcRequest) -> WalletResult<Value> {
        tracing::debug!(method = %request.method, "Local wallet request");
        match request.method.as_str() {
            "eth_requestAccounts" | "eth_accounts" => Ok(json!([self.address().to_string()])),
            "eth_chainId" => Ok(Value::String(format!("0x{:x}", self.chain_id))),
            "personal_sign" => self.personal_sign(&request.params).await,
            other => Err(WalletError::unsupported(other)),
        }
    }
}
