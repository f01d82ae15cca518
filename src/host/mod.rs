//! Host container integration.
//!
//! The mini app runs inside a chat client's embedded browser. The host may
//! expose a bridge (to signal readiness) and the page may carry an injected
//! wallet. Both are optional capabilities, feature-detected at runtime.

use std::sync::Arc;

use crate::wallet::provider::Eip1193Provider;

/// Native app-container bridge.
pub trait HostBridge: Send + Sync {
    /// Tell the host the app has rendered and is ready.
    fn ready(&self);

    /// Ask the host to expand the app viewport.
    fn expand(&self) {}

    /// Ask the host to close the app.
    fn close(&self) {}
}

/// Capabilities offered by the surrounding host.
#[derive(Clone, Default)]
pub struct Environment {
    host: Option<Arc<dyn HostBridge>>,
    injected: Option<Arc<dyn Eip1193Provider>>,
}

impl Environment {
    /// An environment with no bridge and no injected wallet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: Arc<dyn HostBridge>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_injected_wallet(mut self, wallet: Arc<dyn Eip1193Provider>) -> Self {
        self.injected = Some(wallet);
        self
    }

    pub fn host(&self) -> Option<&Arc<dyn HostBridge>> {
        self.host.as_ref()
    }

    /// The injected wallet, if the page carries one.
    pub fn injected_wallet(&self) -> Option<Arc<dyn Eip1193Provider>> {
        self.injected.clone()
    }

    pub fn has_injected_wallet(&self) -> bool {
        self.injected.is_some()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("host", &self.host.is_some())
            .field("injected_wallet", &self.injected.is_some())
            .finish()
    }
}

/// Signal readiness to the host, if there is one. Returns whether a bridge was called.
pub fn bootstrap(env: &Environment) -> bool {
    match env.host() {
        Some(host) => {
            host.ready();
            tracing::debug!("Host bridge notified");
            true
        }
        None => {
            tracing::debug!("No host bridge, skipping ready()");
            false
        }
    }
}
