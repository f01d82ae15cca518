//! Resilience subsystem.
//!
//! # Design Decisions
//! - Wallet requests and the protection call carry a deadline, signing prompts included
//! - Session approval is the one unbounded wait: once the deep link is out, the user decides when to answer
//! - Deadlines are configured per call site (`wallet.rpc_timeout_secs`, `protection.timeout_secs`)
//! - No retries: a failed run is surfaced and the user decides whether to run again

pub mod timeouts;

pub use timeouts::with_deadline;
