//! Timeout enforcement.
//!
//! Wraps a future with a deadline and turns an elapsed timer into
//! [`WalletError::Timeout`], so callers match on one error type.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::wallet::types::{WalletError, WalletResult};

/// Run `fut` with a deadline.
pub async fn with_deadline<T, F>(after: Duration, operation: &'static str, fut: F) -> WalletResult<T>
where
    F: Future<Output = WalletResult<T>>,
{
    match timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_ms = after.as_millis() as u64, "Operation timed out");
            Err(WalletError::Timeout { operation, after })
        }
    }
}
