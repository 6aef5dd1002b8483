//! Blockchain access subsystem.
//!
//! # Data Flow
//! ```text
//! wallet.rs (local signing key)
//!     → client.rs (RPC provider with the key attached)
//!     → contract.rs (createToken binding)
//!
//! encoding.rs turns the user's ticket string into the bytes32 argument.
//! ```
//!
//! # Design Decisions
//! - The page controller only sees the `ChainClient` trait
//! - Every RPC is bounded by the configured timeout
//! - Keys come from the environment, never from config files

pub mod client;
pub mod contract;
pub mod encoding;
pub mod types;
pub mod wallet;

pub use client::{ChainClient, RpcChainClient};
pub use encoding::{format_bytes32_string, parse_bytes32_string, EncodingError};
pub use types::{
    AccountSnapshot, BlockchainConfig, BlockchainError, BlockchainResult, ChainId, NetworkInfo,
};
pub use wallet::Wallet;
