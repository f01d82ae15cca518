//! Wallet connection and data protection for chat-app mini apps.

pub mod config;
pub mod flow;
pub mod host;
pub mod observability;
pub mod protection;
pub mod resilience;
pub mod wallet;

pub use config::AppConfig;
pub use flow::{ConnectAndProtect, FlowSettings, FlowState};
pub use host::{Environment, HostBridge};
