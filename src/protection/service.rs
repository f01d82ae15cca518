//! The protection service seam.

use async_trait::async_trait;
use std::sync::Arc;

use crate::protection::types::{ProtectedData, ProtectionReceipt};
use crate::wallet::provider::Eip1193Provider;
use crate::wallet::types::WalletResult;

/// Encrypts a record and anchors a reference to it on-chain.
///
/// Implementations drive every signature the protocol needs through
/// `provider`; callers see a single call that resolves to a transaction hash.
#[async_trait]
pub trait ProtectionService: Send + Sync {
    async fn protect_data(
        &self,
        provider: Arc<dyn Eip1193Provider>,
        data: &ProtectedData,
    ) -> WalletResult<ProtectionReceipt>;
}
