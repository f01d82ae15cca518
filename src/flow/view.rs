//! Presentation.
//!
//! Pure function of the flow state: what the page shows right now.

use serde::Serialize;

use crate::flow::state::{FlowState, SessionState};

pub const TITLE: &str = "Web3 Telegram Mini App";
pub const SUBTITLE: &str = "Connect your MetaMask wallet and protect your data!";

/// The call-to-action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Connect,
    Protect,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Connect => "Connect Wallet",
            Action::Protect => "Protect My Data",
        }
    }
}

/// Rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub action: Action,
    pub in_progress: bool,
    pub account_line: Option<String>,
    pub result_line: Option<String>,
    pub error_line: Option<String>,
}

impl View {
    pub fn render(state: &FlowState) -> Self {
        let action = match state.session() {
            SessionState::Connected => Action::Protect,
            SessionState::Disconnected | SessionState::Connecting => Action::Connect,
        };

        Self {
            title: TITLE,
            subtitle: SUBTITLE,
            action,
            in_progress: state.is_in_progress(),
            account_line: state.account().map(|a| format!("Connected Account: {}", a)),
            result_line: state
                .result()
                .map(|r| format!("Protected Data Hash: {}", r.transaction_hash)),
            error_line: state.error().map(|e| format!("Error: {}", e.message)),
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.subtitle)?;
        if let Some(line) = &self.account_line {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "[ {} ]", self.action.label())?;
        if self.in_progress {
            writeln!(f, "Working…")?;
        }
        if let Some(line) = &self.result_line {
            writeln!(f, "{}", line)?;
        }
        if let Some(line) = &self.error_line {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
