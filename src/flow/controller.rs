//! The ConnectAndProtect component.
//!
//! # Responsibilities
//! - Bootstrap the host bridge once on mount
//! - Run the click handler: acquire a provider, then protect the record
//! - Publish every state through a watch channel
//! - Forward account updates pushed by a remote session as they arrive
//!
//! A run that is dropped mid-flight leaves an in-progress state behind; the
//! next run resets it before starting.

use alloy::primitives::Address;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::flow::state::{FlowError, FlowEvent, FlowState};
use crate::flow::view::View;
use crate::host::{self, Environment};
use crate::observability::metrics;
use crate::protection::{ProtectedData, ProtectionService};
use crate::wallet::acquire::{acquire_provider, AcquireSettings};
use crate::wallet::deeplink::{DeepLinkSettings, LinkOpener};
use crate::wallet::negotiator::{NegotiatorFactory, NegotiatorOptions, SessionNegotiator};

/// Everything a run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub acquire: AcquireSettings,
    pub payload: ProtectedData,
}

impl FlowSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            acquire: AcquireSettings {
                negotiator: NegotiatorOptions::from(&config.wallet_connect),
                uri_timeout: Duration::from_secs(config.wallet_connect.uri_timeout_secs),
                deep_link: DeepLinkSettings::from_config(&config.deep_link)?,
            },
            payload: ProtectedData::from(&config.payload),
        })
    }
}

/// Connects a wallet and submits the record for protection.
pub struct ConnectAndProtect {
    env: Environment,
    negotiators: Arc<dyn NegotiatorFactory>,
    protector: Arc<dyn ProtectionService>,
    opener: Arc<dyn LinkOpener>,
    settings: FlowSettings,
    state: Arc<watch::Sender<FlowState>>,
    account_updates: Option<JoinHandle<()>>,
    session: Option<Arc<dyn SessionNegotiator>>,
    mounted: bool,
}

impl ConnectAndProtect {
    pub fn new(
        env: Environment,
        negotiators: Arc<dyn NegotiatorFactory>,
        protector: Arc<dyn ProtectionService>,
        opener: Arc<dyn LinkOpener>,
        settings: FlowSettings,
    ) -> Self {
        let (state, _) = watch::channel(FlowState::Idle);
        Self {
            env,
            negotiators,
            protector,
            opener,
            settings,
            state: Arc::new(state),
            account_updates: None,
            session: None,
            mounted: false,
        }
    }

    /// Notify the host bridge. Only the first call has an effect.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        host::bootstrap(&self.env);
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FlowState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> View {
        View::render(&self.state.borrow())
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// The click handler. Runs the whole sequence and returns the final state.
    pub async fn run(&mut self) -> FlowState {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("connect_and_protect", %run_id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&mut self) -> FlowState {
        // A new run owns a new session; stale account updates must not leak in.
        self.stop_account_updates();
        self.session = None;

        let previous = self.state();
        if previous.is_in_progress() {
            tracing::warn!(state = previous.name(), "Previous run was interrupted, resetting");
            self.state.send_replace(FlowState::Idle);
        }
        self.transition(FlowEvent::Start);

        let acquired = match acquire_provider(
            &self.env,
            self.negotiators.as_ref(),
            self.opener.clone(),
            &self.settings.acquire,
        )
        .await
        {
            Ok(acquired) => acquired,
            Err(e) => return self.fail(FlowError::from_acquisition(&e)),
        };

        self.session = acquired.session;
        self.transition(FlowEvent::ProviderReady {
            account: acquired.account,
            path: acquired.path,
        });
        if let Some(rx) = acquired.accounts_changed {
            let task = forward_account_changes(rx, self.state.clone()).in_current_span();
            self.account_updates = Some(tokio::spawn(task));
        }

        let outcome = self
            .protector
            .protect_data(acquired.provider, &self.settings.payload)
            .await;

        match outcome {
            Ok(receipt) => {
                tracing::info!(tx_hash = %receipt.transaction_hash, "Run finished");
                metrics::record_run_outcome("done");
                self.transition(FlowEvent::Protected(receipt));
                self.state()
            }
            Err(e) => self.fail(FlowError::from_protection(&e)),
        }
    }

    fn stop_account_updates(&mut self) {
        if let Some(task) = self.account_updates.take() {
            task.abort();
        }
    }

    fn fail(&mut self, error: FlowError) -> FlowState {
        tracing::warn!(kind = error.kind.as_str(), error = %error.message, "Run failed");
        metrics::record_run_outcome(error.kind.as_str());
        self.transition(FlowEvent::Fail(error));
        self.state()
    }

    fn transition(&self, event: FlowEvent) {
        apply_event(&self.state, event);
    }
}

/// Apply `event` to the published state in one step.
fn apply_event(state: &watch::Sender<FlowState>, event: FlowEvent) {
    state.send_if_modified(|current| match current.clone().apply(event) {
        Ok(next) => {
            tracing::debug!(state = next.name(), "State transition");
            *current = next;
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Dropped invalid state transition");
            false
        }
    });
}

/// Apply session account updates until the session closes its channel.
async fn forward_account_changes(
    mut rx: mpsc::UnboundedReceiver<Vec<String>>,
    state: Arc<watch::Sender<FlowState>>,
) {
    while let Some(accounts) = rx.recv().await {
        let parsed: Vec<Address> = accounts
            .iter()
            .filter_map(|a| match a.parse::<Address>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!(account = %a, error = %e, "Ignoring malformed account");
                    None
                }
            })
            .collect();
        tracing::info!(accounts = parsed.len(), "Wallet accounts changed");
        apply_event(&state, FlowEvent::AccountsChanged(parsed));
    }
    tracing::debug!("Session account updates closed");
}

impl Drop for ConnectAndProtect {
    fn drop(&mut self) {
        self.stop_account_updates();
    }
}

impl std::fmt::Debug for ConnectAndProtect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectAndProtect")
            .field("env", &self.env)
            .field("state", &self.state.borrow().name())
            .field("remote_session", &self.session.is_some())
            .field("mounted", &self.mounted)
            .finish()
    }
}
