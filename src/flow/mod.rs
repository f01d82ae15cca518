//! Connect-and-protect flow.
//!
//! # Data Flow
//! ```text
//! run() (user click)
//!     → state.rs: Start → Connecting
//!     → wallet::acquire_provider
//!     → state.rs: ProviderReady → Protecting
//!     → ProtectionService::protect_data
//!     → state.rs: Protected → Done | Fail → Failed
//!     → view.rs renders the latest state
//! ```
//!
//! # Design Decisions
//! - One immutable state value instead of scattered flags
//! - `run(&mut self)` makes the controller the only writer
//! - Every run starts from scratch; nothing from a previous run is reused

pub mod controller;
pub mod state;
pub mod view;

pub use controller::{ConnectAndProtect, FlowSettings};
pub use state::{FlowError, FlowEvent, FlowState, SessionState, TransitionError};
pub use view::{Action, View};
