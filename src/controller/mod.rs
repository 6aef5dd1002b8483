//! Page controller: the connect / refresh / disconnect / create-token flows.
//!
//! # Data Flow
//! ```text
//! PageAction (button click)
//!     → PageController::dispatch
//!     → WalletConnector / ChainClient (awaited)
//!     → Page (text, visibility, disabled state)
//!
//! ProviderEvent (accountsChanged / chainChanged / networkChanged)
//!     → PageController::next_event
//!     → PageController::handle_event → refresh
//! ```
//!
//! # Design Decisions
//! - One controller owns the session; it is driven from a single task
//! - Connection failures are logged only; token failures are shown to the user
//! - How token results are shown is a `UiConfig` policy

pub mod session;
pub mod types;

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, TxHash, U256};
use futures_util::future::select_all;

use crate::blockchain::{format_bytes32_string, AccountSnapshot, ChainClient};
use crate::config::{FeedbackMode, UiConfig};
use crate::connector::{
    EventKind, ProviderEvent, ProviderOption, Subscription, WalletConnector,
};
use crate::ui::{ElementId, Page};

pub use session::Session;
pub use types::{ConnectionState, ControllerError, ControllerResult, PageAction, TokenRequest};

/// Interim text shown while a create-token call is in flight.
pub const PENDING_STATUS: &str = "Creating token...";

/// Drives the page from wallet and chain state.
pub struct PageController<P: Page> {
    connector: Box<dyn WalletConnector>,
    page: P,
    ui: UiConfig,
    contract_address: Address,
    session: Session,
    state: ConnectionState,
    subscriptions: Vec<Subscription>,
}

impl<P: Page> PageController<P> {
    pub fn new(
        connector: Box<dyn WalletConnector>,
        page: P,
        ui: UiConfig,
        contract_address: Address,
    ) -> Self {
        Self {
            connector,
            page,
            ui,
            contract_address,
            session: Session::default(),
            state: ConnectionState::Disconnected,
            subscriptions: Vec::new(),
        }
    }

    /// Put the page in its initial state.
    pub fn init(&mut self) {
        tracing::info!(
            providers = ?self
                .connector
                .options()
                .into_iter()
                .map(|o| o.name)
                .collect::<Vec<_>>(),
            contract = %self.contract_address,
            test_network = %self.ui.test_network,
            "Initializing page"
        );
        self.show_initial_panels();
        self.page.set_visible(ElementId::CreateToken, false);
        self.page.set_text(ElementId::TxHash, "");
        self.page.set_text(ElementId::Status, "");
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Provider options offered by the connector.
    pub fn provider_options(&self) -> Vec<ProviderOption> {
        self.connector.options()
    }

    /// Number of live provider event subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Run the flow bound to `action`. Failures have already been logged
    /// and, where applicable, shown on the page.
    pub async fn dispatch(&mut self, action: PageAction) {
        match action {
            PageAction::Connect(selection) => {
                let _ = self.connect(selection.as_deref()).await;
            }
            PageAction::Disconnect => self.disconnect().await,
            PageAction::CreateToken => {
                let _ = self.create_token().await;
            }
            PageAction::Refresh => {
                if let Err(e) = self.refresh().await {
                    tracing::warn!(error = %e, "Refresh failed");
                }
            }
        }
    }

    /// Open the provider selection and, on success, load account data.
    pub async fn connect(&mut self, selection: Option<&str>) -> ControllerResult<()> {
        if let Some(provider) = self.session.provider() {
            let err = ControllerError::AlreadyConnected(provider.name().to_string());
            tracing::warn!(error = %err, "Ignoring connect");
            return Err(err);
        }

        tracing::info!(selection = ?selection, "Opening provider selection");
        self.state = ConnectionState::Connecting;

        let provider = match self.connector.connect(selection).await {
            Ok(provider) => provider,
            Err(e) => {
                tracing::warn!(error = %e, "Could not get a wallet connection");
                self.state = ConnectionState::Disconnected;
                return Err(e.into());
            }
        };

        self.subscriptions = EventKind::ALL
            .into_iter()
            .map(|kind| provider.subscribe(kind))
            .collect();
        self.session.start(provider);
        self.state = ConnectionState::Connected;

        self.refresh().await.map(|_| ())
    }

    /// Reload network, account and balance into the page.
    pub async fn refresh(&mut self) -> ControllerResult<AccountSnapshot> {
        let client = self.session.client().ok_or(ControllerError::NotConnected)?;

        // Hide stale account data while loading.
        self.page.set_visible(ElementId::Connected, false);
        self.page.set_visible(ElementId::Prepare, true);
        self.page.set_disabled(ElementId::BtnConnect, true);

        let fetched = fetch_account_data(client.as_ref()).await;
        self.page.set_disabled(ElementId::BtnConnect, false);

        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load account data");
                return Err(e);
            }
        };

        let on_test_network = snapshot.network.name == self.ui.test_network;
        self.page.set_text(ElementId::NetworkName, &snapshot.network.name);
        self.page.set_visible(ElementId::CreateToken, on_test_network);
        self.page
            .set_text(ElementId::SelectedAccount, &snapshot.address.to_string());
        self.page
            .set_text(ElementId::AccountBalance, &format_balance(snapshot.balance_wei));
        self.page.set_text(ElementId::TxHash, "");
        self.session.set_selected_account(snapshot.address);

        self.page.set_visible(ElementId::Prepare, false);
        self.page.set_visible(ElementId::Connected, true);

        tracing::info!(
            network = %snapshot.network.name,
            chain_id = snapshot.network.chain_id,
            account = %snapshot.address,
            create_token_enabled = on_test_network,
            "Account data loaded"
        );
        Ok(snapshot)
    }

    /// Close the provider if it can be closed, drop the session and reset
    /// the page.
    pub async fn disconnect(&mut self) {
        self.state = ConnectionState::Disconnecting;

        if let Some(provider) = self.session.take() {
            tracing::info!(provider = provider.name(), "Killing the wallet connection");
            if provider.supports_close() {
                if let Err(e) = provider.close().await {
                    tracing::warn!(provider = provider.name(), error = %e, "Provider close failed");
                }
            }
        }

        self.connector.clear_cached_provider();
        self.subscriptions.clear();
        self.state = ConnectionState::Disconnected;

        self.show_initial_panels();
    }

    /// Wait for the next change event from the connected provider.
    ///
    /// Never resolves while no subscriptions are held.
    pub async fn next_event(&mut self) -> ProviderEvent {
        loop {
            if self.subscriptions.is_empty() {
                return std::future::pending().await;
            }

            let (event, index) = {
                let pending = self
                    .subscriptions
                    .iter_mut()
                    .map(|subscription| Box::pin(subscription.recv()));
                let (event, index, _) = select_all(pending).await;
                (event, index)
            };

            match event {
                Some(event) => return event,
                None => {
                    let closed = self.subscriptions.remove(index);
                    tracing::debug!(kind = %closed.kind(), "Provider event stream closed");
                }
            }
        }
    }

    /// React to a provider change event.
    pub async fn handle_event(&mut self, event: ProviderEvent) -> ControllerResult<AccountSnapshot> {
        tracing::info!(event = %event.kind(), detail = ?event, "Provider changed");
        self.refresh().await
    }

    /// Submit a create-token request built from the page inputs.
    pub async fn create_token(&mut self) -> ControllerResult<TxHash> {
        let request = TokenRequest {
            recipient_address: self.page.input_value(ElementId::TokenRecipient),
            ticket_value: self.page.input_value(ElementId::Ticket),
        };
        self.submit_token_request(request).await
    }

    /// Encode the ticket, call `createToken`, and show the outcome.
    pub async fn submit_token_request(&mut self, request: TokenRequest) -> ControllerResult<TxHash> {
        let lock_submit = self.ui.disable_submit_while_pending;
        if lock_submit {
            self.page.set_disabled(ElementId::BtnCreateToken, true);
            self.page.set_text(ElementId::Status, PENDING_STATUS);
        }

        let result = self.send_token_request(&request).await;

        if lock_submit {
            self.page.set_disabled(ElementId::BtnCreateToken, false);
            // Status mode overwrites the pending text with the outcome below.
            if self.ui.feedback == FeedbackMode::Alert {
                self.page.set_text(ElementId::Status, "");
            }
        }

        match &result {
            Ok(tx_hash) => self.show_tx_hash(tx_hash),
            Err(e) => self.report_token_error(&request, e),
        }
        result
    }

    async fn send_token_request(&self, request: &TokenRequest) -> ControllerResult<TxHash> {
        let client = self.session.client().ok_or(ControllerError::NotConnected)?;

        let ticket = format_bytes32_string(&request.ticket_value)?;
        let recipient = request
            .recipient_address
            .trim()
            .parse::<Address>()
            .map_err(|e| ControllerError::InvalidRecipient {
                address: request.recipient_address.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            recipient = %recipient,
            ticket = %ticket,
            contract = %self.contract_address,
            "Submitting createToken"
        );
        Ok(client
            .create_token(self.contract_address, recipient, ticket)
            .await?)
    }

    fn show_tx_hash(&mut self, tx_hash: &TxHash) {
        let target = match self.ui.feedback {
            FeedbackMode::Alert => ElementId::TxHash,
            FeedbackMode::Status => ElementId::Status,
        };
        self.page.set_text(target, &tx_hash.to_string());
    }

    fn report_token_error(&mut self, request: &TokenRequest, error: &ControllerError) {
        let message = match error {
            ControllerError::Encoding(_) => error.to_string(),
            _ => format!("Create token error. See wallet for more details. {}", error),
        };
        tracing::error!(ticket = %request.ticket_value, error = %error, "Create token failed");

        match self.ui.feedback {
            FeedbackMode::Alert => self.page.alert(&message),
            FeedbackMode::Status => self.page.set_text(ElementId::Status, &message),
        }
    }

    fn show_initial_panels(&mut self) {
        self.page.set_visible(ElementId::Prepare, true);
        self.page.set_visible(ElementId::Connected, false);
        self.page.set_disabled(ElementId::BtnConnect, false);
    }
}

/// Ether amount with trailing zero decimals dropped, keeping at least one
/// (`1.0`, `0.25`).
pub fn format_balance(wei: U256) -> String {
    let ether = format_ether(wei);
    match ether.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{ether}.0"),
    }
}

async fn fetch_account_data(client: &dyn ChainClient) -> ControllerResult<AccountSnapshot> {
    let network = client.network().await?;
    let address = client.signer_address().await?;
    let balance_wei = client.signer_balance().await?;
    Ok(AccountSnapshot {
        network,
        address,
        balance_wei,
    })
}
