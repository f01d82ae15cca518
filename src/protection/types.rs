//! Protected data types.

use serde::{Deserialize, Serialize};

use crate::config::PayloadConfig;

/// The record submitted for protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedData {
    pub email: String,
    pub telegram_id: String,
}

impl Default for ProtectedData {
    fn default() -> Self {
        Self::from(&PayloadConfig::default())
    }
}

impl From<&PayloadConfig> for ProtectedData {
    fn from(config: &PayloadConfig) -> Self {
        Self {
            email: config.email.clone(),
            telegram_id: config.telegram_id.clone(),
        }
    }
}

/// Outcome of a successful protection call.
///
/// The hash is kept exactly as the service returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionReceipt {
    pub transaction_hash: String,
}

impl ProtectionReceipt {
    pub fn new(transaction_hash: impl Into<String>) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
        }
    }
}
