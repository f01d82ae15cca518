//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters via the `metrics` facade)
//!
//! Consumers:
//!     → stdout (fmt layer installed by the binary)
//!     → whichever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Each run carries a UUID correlation id in its span
//! - The library only emits metrics; installing a recorder is the host's call

pub mod logging;
pub mod metrics;
