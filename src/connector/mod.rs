//! Wallet connector subsystem.
//!
//! # Data Flow
//! ```text
//! connect(selection)
//!     → provider.rs (select_option: explicit, cached, or only option)
//!     → local.rs (key + RPC endpoint → connected provider)
//!     → events.rs (accountsChanged / chainChanged / networkChanged)
//!     → page controller holds one Subscription per event kind
//! ```
//!
//! # Design Decisions
//! - The page controller only sees the `WalletConnector` / `WalletProvider` traits
//! - Close is an optional capability; callers check `supports_close` first
//! - Subscriptions are released by dropping them

pub mod events;
pub mod local;
pub mod provider;

/// Name of the built-in provider option.
pub const INJECTED_PROVIDER: &str = "injected";

pub use events::{EventBus, EventKind, ProviderEvent, Subscription};
pub use local::LocalWalletConnector;
pub use provider::{
    select_option, ProviderOption, WalletConnector, WalletError, WalletProvider, WalletResult,
};
