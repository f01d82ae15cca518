//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → split into per-component settings by the binary
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{check_config, load_config, parse_config, ConfigError};
pub use schema::{
    AppConfig, DeepLinkConfig, LinkStrategy, ObservabilityConfig, PayloadConfig,
    ProtectionConfig, WalletConfig, WalletConnectConfig,
};
pub use validation::ValidationError;
