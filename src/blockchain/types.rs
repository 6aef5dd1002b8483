//! Chain-specific types and error definitions.

use alloy::primitives::{Address, U256};
use thiserror::Error;

// Re-export BlockchainConfig from config module to avoid duplication
pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl ChainId {
    /// Conventional network name for this chain, `unknown` if unrecognized.
    pub fn network_name(self) -> &'static str {
        match self.0 {
            1 => "homestead",
            3 => "ropsten",
            4 => "rinkeby",
            5 => "goerli",
            42 => "kovan",
            11155111 => "sepolia",
            31337 => "anvil",
            _ => "unknown",
        }
    }
}

/// Network identity as reported by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: u64,
}

impl From<ChainId> for NetworkInfo {
    fn from(id: ChainId) -> Self {
        Self {
            name: id.network_name().to_string(),
            chain_id: id.0,
        }
    }
}

/// Everything a refresh reads from the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub network: NetworkInfo,
    pub address: Address,
    pub balance_wei: U256,
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The contract call was rejected by the wallet or the node.
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
