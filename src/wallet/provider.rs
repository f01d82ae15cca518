//! The provider handle: anything that relays EIP-1193 requests to a wallet.

use alloy::primitives::Address;
use async_trait::async_trait;
use serde_json::Value;

use crate::wallet::types::{RpcRequest, WalletError, WalletResult};

/// An object capable of relaying signing and account requests to a wallet,
/// whether the wallet is injected into the page or reached over a session.
#[async_trait]
pub trait Eip1193Provider: Send + Sync {
    async fn request(&self, request: RpcRequest) -> WalletResult<Value>;
}

/// Parse an `eth_accounts`-style result into addresses.
pub fn parse_accounts(value: &Value) -> WalletResult<Vec<Address>> {
    let items = value
        .as_array()
        .ok_or_else(|| WalletError::InvalidResponse(format!("expected account list, got {}", value)))?;

    items
        .iter()
        .map(|item| {
            let s = item
                .as_str()
                .ok_or_else(|| WalletError::InvalidResponse(format!("account is not a string: {}", item)))?;
            s.parse::<Address>()
                .map_err(|e| WalletError::InvalidResponse(format!("invalid account '{}': {}", s, e)))
        })
        .collect()
}

/// Call an account-listing method and return every address.
pub async fn request_accounts(provider: &dyn Eip1193Provider, method: &str) -> WalletResult<Vec<Address>> {
    let value = provider.request(RpcRequest::new(method)).await?;
    parse_accounts(&value)
}

/// Call an account-listing method and return the first address.
pub async fn first_account(provider: &dyn Eip1193Provider, method: &str) -> WalletResult<Option<Address>> {
    Ok(request_accounts(provider, method).await?.into_iter().next())
}
