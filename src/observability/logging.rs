//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber before configuration is read
//! - Resolve the log filter from `RUST_LOG` or configuration
//! - Swap in the configured level once configuration has loaded

use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Handle for replacing the active filter after startup.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Build the filter: `RUST_LOG` wins, otherwise the configured level for this crate.
pub fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("miniapp_protect={},reqwest=warn", log_level).into())
}

/// Install the global subscriber.
///
/// Returns `None` when a subscriber is already installed; later calls are ignored.
pub fn init_logging(log_level: &str) -> Option<FilterHandle> {
    let (filter, handle) = reload::Layer::new(build_filter(log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok()
        .map(|_| handle)
}

/// Apply a new level through `handle`. Returns false if the subscriber is gone.
pub fn set_log_level(handle: &FilterHandle, log_level: &str) -> bool {
    match handle.reload(build_filter(log_level)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, log_level, "Could not apply log level");
            false
        }
    }
}
