//! Local signing keys.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Environment variable holding the key of the built-in `injected` provider.
pub const PRIVATE_KEY_ENV_VAR: &str = "TICKET_MINTER_PRIVATE_KEY";

/// A signing key and the address it controls.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet key loaded");

        Ok(Self { signer })
    }

    /// Load a wallet from the named environment variable.
    pub fn from_env(var: &str) -> BlockchainResult<Self> {
        let private_key = std::env::var(var).map_err(|_| {
            BlockchainError::Wallet(format!("Environment variable {} not set", var))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Wrap the key for use as a provider's transaction signer.
    pub fn to_ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
