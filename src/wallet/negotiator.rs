//! Remote wallet session negotiation.
//!
//! The negotiator pairs with a wallet app through a URI instead of an
//! in-page injection. Session cryptography and relay transport belong to the
//! negotiator implementation; this module only defines the seam and the
//! one-shot URI hand-off.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

use crate::config::WalletConnectConfig;
use crate::wallet::provider::Eip1193Provider;
use crate::wallet::types::{WalletError, WalletResult};

/// Options a negotiator is initialised with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiatorOptions {
    /// Relay project credential.
    pub project_id: String,
    /// Chains the session is requested for.
    pub chains: Vec<u64>,
    /// Whether the negotiator may render its own QR approval UI.
    pub show_qr_modal: bool,
}

impl From<&WalletConnectConfig> for NegotiatorOptions {
    fn from(config: &WalletConnectConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            chains: vec![config.chain_id],
            show_qr_modal: config.show_qr_modal,
        }
    }
}

/// Single-resolution sink for the "display URI" event.
///
/// Only the first non-empty URI is forwarded; everything after is dropped.
#[derive(Debug)]
pub struct UriSink {
    tx: Mutex<Option<oneshot::Sender<String>>>,
}

impl UriSink {
    /// Create a sink and the receiver the acquisition routine awaits.
    pub fn channel() -> (Self, oneshot::Receiver<String>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Mutex::new(Some(tx)) }, rx)
    }

    /// Deliver a URI. Returns true if this call resolved the sink.
    pub fn emit(&self, uri: &str) -> bool {
        if uri.trim().is_empty() {
            tracing::debug!("Ignoring empty session URI");
            return false;
        }
        let Ok(mut slot) = self.tx.lock() else {
            return false;
        };
        match slot.take() {
            Some(tx) => tx.send(uri.to_string()).is_ok(),
            None => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.tx.lock().map(|slot| slot.is_none()).unwrap_or(true)
    }
}

/// An initialised session negotiator.
#[async_trait]
pub trait SessionNegotiator: Send + Sync {
    /// Register the sink for the "display URI" event.
    fn on_display_uri(&self, sink: UriSink);

    /// Register a channel for "accounts changed" events.
    fn on_accounts_changed(&self, tx: mpsc::UnboundedSender<Vec<String>>);

    /// Resolve once a remote wallet approves the session.
    async fn connect(&self) -> WalletResult<()>;

    /// Provider handle relaying requests over the session.
    fn provider(&self) -> Arc<dyn Eip1193Provider>;
}

/// Constructs negotiators. Only called when no injected wallet exists.
#[async_trait]
pub trait NegotiatorFactory: Send + Sync {
    async fn init(&self, options: &NegotiatorOptions) -> WalletResult<Arc<dyn SessionNegotiator>>;
}

/// Factory for hosts that cannot run a remote session.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableNegotiator;

#[async_trait]
impl NegotiatorFactory for UnavailableNegotiator {
    async fn init(&self, options: &NegotiatorOptions) -> WalletResult<Arc<dyn SessionNegotiator>> {
        tracing::warn!(chains = ?options.chains, "Remote wallet sessions are not available on this host");
        Err(WalletError::Unavailable(
            "no injected wallet found and this host cannot open a remote wallet session".to_string(),
        ))
    }
}
