//! Wallet integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment (injected wallet? host bridge?)
//!     → acquire.rs (pick a path, obtain a provider handle)
//!         → provider.rs (EIP-1193 request seam)
//!         → local.rs / rpc.rs (headless injected wallets)
//!         → negotiator.rs (remote session seam, one-shot URI sink)
//!         → deeplink.rs (hand the session URI to the wallet app)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys
//! - Session cryptography stays inside the negotiator implementation

pub mod acquire;
pub mod deeplink;
pub mod local;
pub mod negotiator;
pub mod provider;
pub mod rpc;
pub mod types;

pub use acquire::{acquire_provider, AcquireSettings, AcquiredProvider};
pub use deeplink::{build_deep_link, DeepLinkSettings, LinkOpener};
pub use local::LocalWallet;
pub use negotiator::{NegotiatorFactory, NegotiatorOptions, SessionNegotiator, UnavailableNegotiator, UriSink};
pub use provider::Eip1193Provider;
pub use rpc::RpcWallet;
pub use types::{ErrorKind, ProviderPath, RpcRequest, WalletError, WalletResult};
