//! The connected wallet, if any.

use std::sync::Arc;

use alloy::primitives::Address;

use crate::blockchain::ChainClient;
use crate::connector::WalletProvider;

/// Provider handle plus the account last read through it.
#[derive(Default)]
pub struct Session {
    provider: Option<Box<dyn WalletProvider>>,
    selected_account: Option<Address>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<&dyn WalletProvider> {
        self.provider.as_deref()
    }

    pub fn client(&self) -> Option<Arc<dyn ChainClient>> {
        self.provider.as_ref().map(|p| p.client())
    }

    pub fn selected_account(&self) -> Option<Address> {
        self.selected_account
    }

    pub(crate) fn start(&mut self, provider: Box<dyn WalletProvider>) {
        self.provider = Some(provider);
        self.selected_account = None;
    }

    pub(crate) fn set_selected_account(&mut self, account: Address) {
        if self.provider.is_some() {
            self.selected_account = Some(account);
        }
    }

    /// End the session, handing back the provider for teardown.
    pub(crate) fn take(&mut self) -> Option<Box<dyn WalletProvider>> {
        self.selected_account = None;
        self.provider.take()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("selected_account", &self.selected_account)
            .finish()
    }
}
