//! Provider acquisition.
//!
//! # Data Flow
//! ```text
//! injected wallet present?
//!     yes → eth_requestAccounts → first account
//!     no  → factory.init(options)
//!           → register URI sink + accounts channel
//!           → select { first URI (biased), connect() resolved, URI deadline }
//!           → deep link dispatched exactly once
//!           → await connect() (no deadline, the user is approving)
//!           → eth_accounts on the session provider
//! ```

use alloy::primitives::Address;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::host::Environment;
use crate::observability::metrics;
use crate::wallet::deeplink::{self, DeepLinkSettings, LinkOpener};
use crate::wallet::negotiator::{NegotiatorFactory, NegotiatorOptions, SessionNegotiator, UriSink};
use crate::wallet::provider::{first_account, Eip1193Provider};
use crate::wallet::types::{ProviderPath, WalletError, WalletResult};

/// Settings for acquiring a provider.
#[derive(Debug, Clone)]
pub struct AcquireSettings {
    pub negotiator: NegotiatorOptions,
    pub uri_timeout: Duration,
    pub deep_link: DeepLinkSettings,
}

/// A connected provider handle.
pub struct AcquiredProvider {
    pub provider: Arc<dyn Eip1193Provider>,
    pub account: Address,
    pub path: ProviderPath,
    /// Account updates pushed by a remote session; `None` for injected wallets.
    pub accounts_changed: Option<mpsc::UnboundedReceiver<Vec<String>>>,
    /// The negotiator backing a remote session, kept alive with the handle.
    pub session: Option<Arc<dyn SessionNegotiator>>,
}

impl std::fmt::Debug for AcquiredProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquiredProvider")
            .field("account", &self.account)
            .field("path", &self.path)
            .finish()
    }
}

/// Obtain a provider handle, preferring an injected wallet.
pub async fn acquire_provider(
    env: &Environment,
    negotiators: &dyn NegotiatorFactory,
    opener: Arc<dyn LinkOpener>,
    settings: &AcquireSettings,
) -> WalletResult<AcquiredProvider> {
    let acquired = match env.injected_wallet() {
        Some(injected) => acquire_injected(injected).await?,
        None => acquire_session(negotiators, opener, settings).await?,
    };

    metrics::record_provider_acquired(acquired.path.as_str());
    tracing::info!(
        account = %acquired.account,
        path = acquired.path.as_str(),
        "Wallet connected"
    );
    Ok(acquired)
}

async fn acquire_injected(injected: Arc<dyn Eip1193Provider>) -> WalletResult<AcquiredProvider> {
    tracing::info!("Using injected wallet");

    let account = first_account(injected.as_ref(), "eth_requestAccounts")
        .await?
        .ok_or_else(|| WalletError::Rejected("wallet returned no accounts".to_string()))?;

    Ok(AcquiredProvider {
        provider: injected,
        account,
        path: ProviderPath::Injected,
        accounts_changed: None,
        session: None,
    })
}

async fn acquire_session(
    negotiators: &dyn NegotiatorFactory,
    opener: Arc<dyn LinkOpener>,
    settings: &AcquireSettings,
) -> WalletResult<AcquiredProvider> {
    tracing::info!(
        chains = ?settings.negotiator.chains,
        "No injected wallet, negotiating a remote session"
    );

    let negotiator = negotiators.init(&settings.negotiator).await?;

    let (sink, mut uri_rx) = UriSink::channel();
    negotiator.on_display_uri(sink);
    let (accounts_tx, accounts_rx) = mpsc::unbounded_channel();
    negotiator.on_accounts_changed(accounts_tx);

    let connecting = negotiator.clone();
    let connect = connecting.connect();
    tokio::pin!(connect);

    let (uri, connected) = tokio::select! {
        biased;
        uri = &mut uri_rx => {
            let uri = uri.map_err(|_| {
                WalletError::UriNotGenerated("the session negotiator closed before emitting a link".to_string())
            })?;
            (uri, false)
        }
        result = &mut connect => {
            result?;
            // The URI may have been emitted in the same poll that resolved the session.
            match uri_rx.try_recv() {
                Ok(uri) => (uri, true),
                Err(_) => {
                    return Err(WalletError::UriNotGenerated(
                        "the session resolved without ever emitting a link".to_string(),
                    ));
                }
            }
        }
        _ = tokio::time::sleep(settings.uri_timeout) => {
            return Err(WalletError::UriNotGenerated(format!(
                "no link received within {:?}",
                settings.uri_timeout
            )));
        }
    };

    tracing::debug!("Session URI received");
    deeplink::dispatch(opener, &settings.deep_link, &uri);

    if !connected {
        connect.await?;
    }

    let provider = negotiator.provider();
    let account = first_account(provider.as_ref(), "eth_accounts")
        .await?
        .ok_or_else(|| WalletError::Unavailable("session established without any account".to_string()))?;

    Ok(AcquiredProvider {
        provider,
        account,
        path: ProviderPath::Session,
        accounts_changed: Some(accounts_rx),
        session: Some(negotiator),
    })
}
