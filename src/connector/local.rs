//! Connector backed by locally held keys and JSON-RPC endpoints.
//!
//! # Responsibilities
//! - Offer the built-in `injected` option plus the configured providers
//! - Resolve a selection (explicit, cached, or the only option)
//! - Build an RPC client for the chosen provider
//! - Watch the chain id and announce `chainChanged` / `networkChanged`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::blockchain::{BlockchainConfig, ChainClient, RpcChainClient, Wallet};
use crate::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use crate::config::schema::{default_poll_interval_ms, ProviderOptionConfig, WalletConfig};
use crate::connector::events::{EventBus, EventKind, ProviderEvent, Subscription};
use crate::connector::provider::{
    select_option, ProviderOption, WalletConnector, WalletProvider, WalletResult,
};
use crate::connector::INJECTED_PROVIDER;

/// Environment variable holding the RPC URL of the `injected` provider.
pub const RPC_URL_ENV_VAR: &str = "TICKET_MINTER_RPC_URL";

const DEFAULT_INJECTED_RPC_URL: &str = "http://localhost:8545";

/// A provider option together with how to reach it.
#[derive(Debug, Clone)]
struct LocalOption {
    option: ProviderOption,
    config: ProviderOptionConfig,
    closable: bool,
}

/// Wallet connector for keys held in environment variables.
#[derive(Debug)]
pub struct LocalWalletConnector {
    options: Vec<LocalOption>,
    cache_provider: bool,
    cached: Option<String>,
    blockchain: BlockchainConfig,
}

impl LocalWalletConnector {
    pub fn new(wallet: &WalletConfig, blockchain: &BlockchainConfig) -> Self {
        let mut options = Vec::new();

        if !wallet.disable_injected_provider {
            let rpc_url = std::env::var(RPC_URL_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_INJECTED_RPC_URL.to_string());
            options.push(LocalOption {
                option: ProviderOption {
                    name: INJECTED_PROVIDER.to_string(),
                    description: format!("{} via {}", PRIVATE_KEY_ENV_VAR, rpc_url),
                },
                config: ProviderOptionConfig {
                    name: INJECTED_PROVIDER.to_string(),
                    rpc_url,
                    private_key_env: PRIVATE_KEY_ENV_VAR.to_string(),
                    poll_interval_ms: default_poll_interval_ms(),
                },
                closable: false,
            });
        }

        for config in &wallet.providers {
            options.push(LocalOption {
                option: ProviderOption {
                    name: config.name.clone(),
                    description: format!("{} via {}", config.private_key_env, config.rpc_url),
                },
                config: config.clone(),
                closable: true,
            });
        }

        tracing::info!(
            providers = ?options.iter().map(|o| o.option.name.as_str()).collect::<Vec<_>>(),
            cache_provider = wallet.cache_provider,
            "Wallet connector initialized"
        );

        Self {
            options,
            cache_provider: wallet.cache_provider,
            cached: None,
            blockchain: blockchain.clone(),
        }
    }

    fn resolve(&self, selection: Option<&str>) -> WalletResult<LocalOption> {
        select_option(&self.options, selection, self.cached_provider()).cloned()
    }
}

impl AsRef<ProviderOption> for LocalOption {
    fn as_ref(&self) -> &ProviderOption {
        &self.option
    }
}

#[async_trait]
impl WalletConnector for LocalWalletConnector {
    fn options(&self) -> Vec<ProviderOption> {
        self.options.iter().map(|o| o.option.clone()).collect()
    }

    async fn connect(&mut self, selection: Option<&str>) -> WalletResult<Box<dyn WalletProvider>> {
        let chosen = self.resolve(selection)?;
        tracing::info!(provider = %chosen.option.name, "Connecting wallet provider");

        let wallet = Wallet::from_env(&chosen.config.private_key_env)?;
        let client = RpcChainClient::new(&chosen.config.rpc_url, &wallet, &self.blockchain)?;
        let chain_id = client.chain_id().await?;

        let events = EventBus::default();
        let watcher = spawn_chain_watcher(
            client.clone(),
            events.clone(),
            chain_id.0,
            Duration::from_millis(chosen.config.poll_interval_ms),
        );

        if self.cache_provider {
            self.cached = Some(chosen.option.name.clone());
        }

        tracing::info!(
            provider = %chosen.option.name,
            chain_id = chain_id.0,
            address = %wallet.address(),
            "Wallet provider connected"
        );

        Ok(Box::new(LocalProvider {
            name: chosen.option.name,
            client: Arc::new(client),
            events,
            watcher,
            closable: chosen.closable,
        }))
    }

    fn cached_provider(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    fn clear_cached_provider(&mut self) {
        if let Some(name) = self.cached.take() {
            tracing::debug!(provider = %name, "Cleared cached provider");
        }
    }
}

/// Poll the chain id and announce changes.
fn spawn_chain_watcher(
    client: RpcChainClient,
    events: EventBus,
    initial_chain_id: u64,
    poll_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = initial_chain_id;
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match client.chain_id().await {
                Ok(id) if id.0 != last => {
                    tracing::info!(from = last, to = id.0, "Chain changed");
                    last = id.0;
                    events.emit(ProviderEvent::ChainChanged(id.0));
                    events.emit(ProviderEvent::NetworkChanged(id.0));
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "Chain id poll failed"),
            }
        }
    })
}

/// Provider handed out by [`LocalWalletConnector`].
struct LocalProvider {
    name: String,
    client: Arc<RpcChainClient>,
    events: EventBus,
    watcher: JoinHandle<()>,
    closable: bool,
}

#[async_trait]
impl WalletProvider for LocalProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn client(&self) -> Arc<dyn ChainClient> {
        self.client.clone()
    }

    fn subscribe(&self, kind: EventKind) -> Subscription {
        self.events.subscribe(kind)
    }

    fn supports_close(&self) -> bool {
        self.closable
    }

    async fn close(&self) -> WalletResult<()> {
        self.watcher.abort();
        tracing::info!(provider = %self.name, "Wallet provider closed");
        Ok(())
    }
}

impl Drop for LocalProvider {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
