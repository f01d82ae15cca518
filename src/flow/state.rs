//! Connect-and-protect state machine.
//!
//! # States
//! - Idle: nothing has run yet
//! - Connecting: obtaining a provider handle
//! - Protecting: provider obtained, protection call in flight
//! - Done: transaction hash received
//! - Failed: any step failed; terminal until the next run
//!
//! # State Transitions
//! ```text
//! Idle | Done | Failed → Connecting: Start
//! Connecting → Protecting: ProviderReady
//! Protecting → Done: Protected
//! Connecting | Protecting → Failed: Fail
//! ```
//!
//! Values are immutable; `apply` consumes a state and returns the next one.

use alloy::primitives::Address;
use serde::Serialize;
use thiserror::Error;

use crate::protection::ProtectionReceipt;
use crate::wallet::types::{ErrorKind, ProviderPath, WalletError};

/// A failure as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FlowError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Something went wrong. Please try again.".to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    /// Classify a failure raised while connecting the wallet.
    pub fn from_acquisition(err: &WalletError) -> Self {
        Self::new(err.kind(), err.to_string())
    }

    /// Any failure after a provider exists counts as a protection failure.
    pub fn from_protection(err: &WalletError) -> Self {
        Self::new(ErrorKind::Protection, err.to_string())
    }
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FlowError {}

/// Coarse session state derived from the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Where a run stands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Idle,
    Connecting,
    Protecting {
        account: Option<Address>,
        path: ProviderPath,
    },
    Done {
        account: Option<Address>,
        receipt: ProtectionReceipt,
    },
    Failed {
        account: Option<Address>,
        error: FlowError,
    },
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    Start,
    ProviderReady { account: Address, path: ProviderPath },
    Protected(ProtectionReceipt),
    Fail(FlowError),
    AccountsChanged(Vec<Address>),
}

impl FlowEvent {
    fn name(&self) -> &'static str {
        match self {
            FlowEvent::Start => "start",
            FlowEvent::ProviderReady { .. } => "provider_ready",
            FlowEvent::Protected(_) => "protected",
            FlowEvent::Fail(_) => "fail",
            FlowEvent::AccountsChanged(_) => "accounts_changed",
        }
    }
}

/// An event that is not valid in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event '{event}' is not valid in state '{state}'")]
pub struct TransitionError {
    pub state: &'static str,
    pub event: &'static str,
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Connecting => "connecting",
            FlowState::Protecting { .. } => "protecting",
            FlowState::Done { .. } => "done",
            FlowState::Failed { .. } => "failed",
        }
    }

    /// Compute the next state.
    pub fn apply(self, event: FlowEvent) -> Result<FlowState, TransitionError> {
        let state = self.name();
        let event_name = event.name();
        let invalid = || TransitionError { state, event: event_name };

        match (self, event) {
            (FlowState::Idle | FlowState::Done { .. } | FlowState::Failed { .. }, FlowEvent::Start) => {
                Ok(FlowState::Connecting)
            }
            (FlowState::Connecting, FlowEvent::ProviderReady { account, path }) => Ok(FlowState::Protecting {
                account: Some(account),
                path,
            }),
            (FlowState::Protecting { account, .. }, FlowEvent::Protected(receipt)) => {
                Ok(FlowState::Done { account, receipt })
            }
            (FlowState::Connecting, FlowEvent::Fail(error)) => Ok(FlowState::Failed { account: None, error }),
            (FlowState::Protecting { account, .. }, FlowEvent::Fail(error)) => {
                Ok(FlowState::Failed { account, error })
            }
            (current, FlowEvent::AccountsChanged(accounts)) => Ok(current.with_account(accounts.first().copied())),
            _ => Err(invalid()),
        }
    }

    /// Replace the account on states that carry one; other states are unchanged.
    fn with_account(self, next: Option<Address>) -> FlowState {
        match self {
            FlowState::Protecting { path, .. } => FlowState::Protecting { account: next, path },
            FlowState::Done { receipt, .. } => FlowState::Done { account: next, receipt },
            FlowState::Failed { account: Some(_), error } => FlowState::Failed { account: next, error },
            other => other,
        }
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            FlowState::Protecting { account, .. }
            | FlowState::Done { account, .. }
            | FlowState::Failed { account, .. } => *account,
            FlowState::Idle | FlowState::Connecting => None,
        }
    }

    /// The transaction hash, only while the latest run succeeded.
    pub fn result(&self) -> Option<&ProtectionReceipt> {
        match self {
            FlowState::Done { receipt, .. } => Some(receipt),
            _ => None,
        }
    }

    /// The failure, only while the latest run failed.
    pub fn error(&self) -> Option<&FlowError> {
        match self {
            FlowState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, FlowState::Connecting | FlowState::Protecting { .. })
    }

    pub fn session(&self) -> SessionState {
        match self {
            FlowState::Connecting => SessionState::Connecting,
            _ if self.account().is_some() => SessionState::Connected,
            _ => SessionState::Disconnected,
        }
    }
}
