//! Wallet connector and provider traits.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::blockchain::{BlockchainError, ChainClient};
use crate::connector::events::{EventKind, Subscription};

#[derive(Debug, Error)]
pub enum WalletError {
    /// No provider was chosen.
    #[error("provider selection cancelled")]
    Cancelled,

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("provider '{0}' does not support close")]
    CloseUnsupported(String),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

pub type WalletResult<T> = Result<T, WalletError>;

/// A provider the connector can offer for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOption {
    pub name: String,
    pub description: String,
}

/// A connected wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Name of the option this provider was selected from.
    fn name(&self) -> &str;

    /// Chain access through this provider.
    fn client(&self) -> Arc<dyn ChainClient>;

    /// Register for one kind of change event.
    fn subscribe(&self, kind: EventKind) -> Subscription;

    /// Whether [`WalletProvider::close`] does anything.
    fn supports_close(&self) -> bool {
        false
    }

    /// Tear down the connection.
    async fn close(&self) -> WalletResult<()> {
        Err(WalletError::CloseUnsupported(self.name().to_string()))
    }
}

/// Presents provider options and hands out connected providers.
#[async_trait]
pub trait WalletConnector: Send {
    /// Options available for selection.
    fn options(&self) -> Vec<ProviderOption>;

    /// Connect to the provider named by `selection`.
    ///
    /// With no explicit selection the connector falls back to its cached
    /// provider, then to its only option. Anything else is
    /// [`WalletError::Cancelled`].
    async fn connect(&mut self, selection: Option<&str>) -> WalletResult<Box<dyn WalletProvider>>;

    /// Provider reused by the next unqualified connect, if any.
    fn cached_provider(&self) -> Option<&str>;

    /// Forget the cached provider.
    fn clear_cached_provider(&mut self);
}

impl AsRef<ProviderOption> for ProviderOption {
    fn as_ref(&self) -> &ProviderOption {
        self
    }
}

/// Resolve a selection against the available options.
pub fn select_option<'a, T: AsRef<ProviderOption>>(
    options: &'a [T],
    selection: Option<&str>,
    cached: Option<&str>,
) -> WalletResult<&'a T> {
    let find = move |name: &str| options.iter().find(|o| o.as_ref().name == name);

    if let Some(name) = selection {
        return find(name).ok_or_else(|| WalletError::UnknownProvider(name.to_string()));
    }
    if let Some(option) = cached.and_then(find) {
        return Ok(option);
    }
    match options {
        [only] => Ok(only),
        _ => Err(WalletError::Cancelled),
    }
}
