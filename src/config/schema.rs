//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mini app.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Bellecour sidechain, where protected data records are anchored.
pub const BELLECOUR_CHAIN_ID: u64 = 134;

/// Project credential registered with the wallet-connect relay.
pub const DEFAULT_PROJECT_ID: &str = "b2e4ce8c8c62a7815f1b264f625182dd";

/// Root configuration for the mini app.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Remote wallet session settings.
    pub wallet_connect: WalletConnectConfig,

    /// Deep link construction and dispatch.
    pub deep_link: DeepLinkConfig,

    /// Protection service settings.
    pub protection: ProtectionConfig,

    /// Injected wallet transport settings.
    pub wallet: WalletConfig,

    /// Record submitted for protection.
    pub payload: PayloadConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote wallet session negotiator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConnectConfig {
    /// Relay project credential.
    pub project_id: String,

    /// Target chain the session is opened for.
    pub chain_id: u64,

    /// Whether the negotiator may show its own QR approval UI.
    /// Embedded web views cannot render it, so this stays off.
    pub show_qr_modal: bool,

    /// How long to wait for the negotiator to emit a pairing URI.
    pub uri_timeout_secs: u64,
}

impl Default for WalletConnectConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            chain_id: BELLECOUR_CHAIN_ID,
            show_qr_modal: false,
            uri_timeout_secs: 30,
        }
    }
}

/// How a deep link is handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkStrategy {
    /// Open the link in a new browsing context right away.
    #[default]
    Open,
    /// Navigate the current context to the link after a delay.
    Navigate,
}

impl LinkStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStrategy::Open => "open",
            LinkStrategy::Navigate => "navigate",
        }
    }
}

/// Deep link configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeepLinkConfig {
    /// Wallet link base; the session URI is appended as `?uri=`.
    pub base_url: String,

    /// Open-vs-navigate strategy.
    pub strategy: LinkStrategy,

    /// Delay before navigating, only used by [`LinkStrategy::Navigate`].
    pub navigate_delay_ms: u64,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://metamask.app.link/wc".to_string(),
            strategy: LinkStrategy::Open,
            navigate_delay_ms: 500,
        }
    }
}

/// Protection gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// Base URL of the protection gateway.
    pub endpoint: String,

    /// Request timeout in seconds. Signing prompts count against it.
    pub timeout_secs: u64,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000".to_string(),
            timeout_secs: 120,
        }
    }
}

/// JSON-RPC wallet configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Endpoint of an EIP-1193 capable JSON-RPC wallet, if any.
    pub rpc_url: Option<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            rpc_timeout_secs: 60,
        }
    }
}

/// Record submitted to the protection service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PayloadConfig {
    pub email: String,
    pub telegram_id: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            // Placeholders until the host hands over real user data.
            email: "user@example.com".to_string(),
            telegram_id: "12345678".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
