//! Metrics collection.
//!
//! # Metrics
//! - `miniapp_runs_total` (counter): finished runs by outcome
//! - `miniapp_provider_acquired_total` (counter): provider handles by path
//! - `miniapp_deep_links_total` (counter): dispatched deep links by strategy

use metrics::counter;

/// Record the terminal outcome of a run ("done" or an error kind).
pub fn record_run_outcome(outcome: &'static str) {
    counter!("miniapp_runs_total", "outcome" => outcome).increment(1);
}

/// Record which acquisition path produced a provider.
pub fn record_provider_acquired(path: &'static str) {
    counter!("miniapp_provider_acquired_total", "path" => path).increment(1);
}

/// Record a dispatched deep link.
pub fn record_deep_link(strategy: &'static str) {
    counter!("miniapp_deep_links_total", "strategy" => strategy).increment(1);
}
