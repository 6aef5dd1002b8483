//! Shared fakes for controller integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;

use ticket_minter::blockchain::{BlockchainError, BlockchainResult, ChainClient, NetworkInfo};
use ticket_minter::config::schema::DEFAULT_CONTRACT_ADDRESS;
use ticket_minter::config::UiConfig;
use ticket_minter::connector::{
    EventBus, EventKind, ProviderOption, Subscription, WalletConnector, WalletError,
    WalletProvider, WalletResult,
};
use ticket_minter::ui::{ElementId, MemoryPage, Page};
use ticket_minter::PageController;

pub const FAKE_TX_HASH: TxHash = TxHash::repeat_byte(0xab);

pub fn account() -> Address {
    Address::repeat_byte(0x42)
}

pub fn recipient() -> String {
    Address::repeat_byte(0x07).to_string()
}

pub fn contract_address() -> Address {
    DEFAULT_CONTRACT_ADDRESS.parse().unwrap()
}

/// Chain client with scripted answers that records contract calls.
pub struct FakeChain {
    network: Mutex<NetworkInfo>,
    balance: U256,
    fail_fetch: AtomicBool,
    submit_error: Mutex<Option<String>>,
    calls: Mutex<Vec<(Address, Address, B256)>>,
}

impl FakeChain {
    pub fn on(name: &str, chain_id: u64) -> Self {
        Self {
            network: Mutex::new(NetworkInfo {
                name: name.to_string(),
                chain_id,
            }),
            balance: U256::from(10u64).pow(U256::from(18u64)),
            fail_fetch: AtomicBool::new(false),
            submit_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn switch_network(&self, name: &str, chain_id: u64) {
        *self.network.lock().unwrap() = NetworkInfo {
            name: name.to_string(),
            chain_id,
        };
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_submit(&self, message: &str) {
        *self.submit_error.lock().unwrap() = Some(message.to_string());
    }

    /// `(contract, recipient, ticket)` of every createToken call.
    pub fn calls(&self) -> Vec<(Address, Address, B256)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn network(&self) -> BlockchainResult<NetworkInfo> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rpc("eth_chainId: connection refused".to_string()));
        }
        Ok(self.network.lock().unwrap().clone())
    }

    async fn signer_address(&self) -> BlockchainResult<Address> {
        Ok(account())
    }

    async fn signer_balance(&self) -> BlockchainResult<U256> {
        Ok(self.balance)
    }

    async fn create_token(
        &self,
        contract: Address,
        recipient: Address,
        ticket: B256,
    ) -> BlockchainResult<TxHash> {
        if let Some(message) = self.submit_error.lock().unwrap().clone() {
            return Err(BlockchainError::Transaction(message));
        }
        self.calls.lock().unwrap().push((contract, recipient, ticket));
        Ok(FAKE_TX_HASH)
    }
}

/// State shared between a fake connector, its providers, and the test.
pub struct FakeWallet {
    pub chain: Arc<FakeChain>,
    pub events: EventBus,
    closable: bool,
    refuse: AtomicBool,
    close_calls: AtomicUsize,
    clear_calls: AtomicUsize,
}

impl FakeWallet {
    pub fn new(chain: FakeChain, closable: bool) -> Arc<Self> {
        Arc::new(Self {
            chain: Arc::new(chain),
            events: EventBus::default(),
            closable,
            refuse: AtomicBool::new(false),
            close_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
        })
    }

    /// Make the next connects behave like a dismissed selection dialog.
    pub fn refuse_connections(&self) {
        self.refuse.store(true, Ordering::SeqCst);
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

pub struct FakeConnector {
    wallet: Arc<FakeWallet>,
    cached: Option<String>,
}

impl FakeConnector {
    pub fn new(wallet: &Arc<FakeWallet>) -> Self {
        Self {
            wallet: wallet.clone(),
            cached: None,
        }
    }
}

#[async_trait]
impl WalletConnector for FakeConnector {
    fn options(&self) -> Vec<ProviderOption> {
        vec![ProviderOption {
            name: "fake".to_string(),
            description: "scripted wallet".to_string(),
        }]
    }

    async fn connect(&mut self, _selection: Option<&str>) -> WalletResult<Box<dyn WalletProvider>> {
        if self.wallet.refuse.load(Ordering::SeqCst) {
            return Err(WalletError::Cancelled);
        }
        self.cached = Some("fake".to_string());
        Ok(Box::new(FakeProvider {
            wallet: self.wallet.clone(),
        }))
    }

    fn cached_provider(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    fn clear_cached_provider(&mut self) {
        self.wallet.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.cached = None;
    }
}

struct FakeProvider {
    wallet: Arc<FakeWallet>,
}

#[async_trait]
impl WalletProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn client(&self) -> Arc<dyn ChainClient> {
        self.wallet.chain.clone()
    }

    fn subscribe(&self, kind: EventKind) -> Subscription {
        self.wallet.events.subscribe(kind)
    }

    fn supports_close(&self) -> bool {
        self.wallet.closable
    }

    async fn close(&self) -> WalletResult<()> {
        self.wallet.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Page that also keeps a log of every write.
#[derive(Default)]
pub struct RecordingPage {
    pub inner: MemoryPage,
    pub log: Vec<String>,
}

impl Page for RecordingPage {
    fn set_text(&mut self, id: ElementId, text: &str) {
        self.log.push(format!("text {id} {text}"));
        self.inner.set_text(id, text);
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.log.push(format!("visible {id} {visible}"));
        self.inner.set_visible(id, visible);
    }

    fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        self.log.push(format!("disabled {id} {disabled}"));
        self.inner.set_disabled(id, disabled);
    }

    fn input_value(&self, id: ElementId) -> String {
        self.inner.input_value(id)
    }

    fn alert(&mut self, message: &str) {
        self.log.push(format!("alert {message}"));
        self.inner.alert(message);
    }
}

/// A freshly initialized controller over `page`.
pub fn controller_with<P: Page>(wallet: &Arc<FakeWallet>, page: P, ui: UiConfig) -> PageController<P> {
    let mut controller = PageController::new(
        Box::new(FakeConnector::new(wallet)),
        page,
        ui,
        contract_address(),
    );
    controller.init();
    controller
}

pub fn controller(wallet: &Arc<FakeWallet>, ui: UiConfig) -> PageController<MemoryPage> {
    controller_with(wallet, MemoryPage::new(), ui)
}
