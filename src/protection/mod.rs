//! Data protection subsystem.
//!
//! # Data Flow
//! ```text
//! provider handle + ProtectedData
//!     → service.rs (ProtectionService seam)
//!     → http.rs (gateway adapter: sign payload, POST, parse hash)
//!     → ProtectionReceipt { transaction_hash }
//! ```

pub mod http;
pub mod service;
pub mod types;

pub use http::HttpProtector;
pub use service::ProtectionService;
pub use types::{ProtectedData, ProtectionReceipt};
