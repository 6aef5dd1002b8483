//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint with a signing wallet attached
//! - Query network identity, signer address and balance
//! - Submit the `createToken` contract call
//! - Handle timeouts and network errors gracefully

use std::fmt::Display;
use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::contract::TicketToken;
use crate::blockchain::types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, NetworkInfo,
};
use crate::blockchain::wallet::Wallet;

/// Chain access as seen through a connected wallet provider.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Network the provider is currently on.
    async fn network(&self) -> BlockchainResult<NetworkInfo>;

    /// Address that signs transactions.
    async fn signer_address(&self) -> BlockchainResult<Address>;

    /// Balance of the signing address, in wei.
    async fn signer_balance(&self) -> BlockchainResult<U256>;

    /// Call `createToken(recipient, ticket)` on `contract` and return the
    /// hash of the submitted transaction.
    async fn create_token(
        &self,
        contract: Address,
        recipient: Address,
        ticket: B256,
    ) -> BlockchainResult<TxHash>;
}

/// JSON-RPC backed client signing with a local key.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: DynProvider,
    signer: Address,
    rpc_url: String,
    timeout_duration: Duration,
}

impl RpcChainClient {
    /// Create a client for `rpc_url` that signs with `wallet`.
    ///
    /// No request is made until the first query.
    pub fn new(rpc_url: &str, wallet: &Wallet, config: &BlockchainConfig) -> BlockchainResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.to_ethereum_wallet())
            .connect_http(url)
            .erased();

        tracing::debug!(rpc_url = %rpc_url, signer = %wallet.address(), "Chain client created");

        Ok(Self {
            provider,
            signer: wallet.address(),
            rpc_url: rpc_url.to_string(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// Get the chain ID from the RPC.
    pub async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.timed("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn timed<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{}: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn network(&self) -> BlockchainResult<NetworkInfo> {
        self.chain_id().await.map(NetworkInfo::from)
    }

    async fn signer_address(&self) -> BlockchainResult<Address> {
        Ok(self.signer)
    }

    async fn signer_balance(&self) -> BlockchainResult<U256> {
        self.timed("eth_getBalance", self.provider.get_balance(self.signer))
            .await
    }

    async fn create_token(
        &self,
        contract: Address,
        recipient: Address,
        ticket: B256,
    ) -> BlockchainResult<TxHash> {
        let token = TicketToken::new(contract, self.provider.clone());
        let call = token.createToken(recipient, ticket);

        let pending = match timeout(self.timeout_duration, call.send()).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => return Err(BlockchainError::Transaction(e.to_string())),
            Err(_) => return Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        };

        let tx_hash = *pending.tx_hash();
        tracing::info!(
            tx_hash = %tx_hash,
            contract = %contract,
            recipient = %recipient,
            "createToken submitted"
        );
        Ok(tx_hash)
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("rpc_url", &self.rpc_url)
            .field("signer", &self.signer)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
