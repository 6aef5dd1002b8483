//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the minter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Address of the deployed ticket token contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x1319b0457c4e39a259F8e18d1e2Dc316A941aE20";

/// Network on which the ticket token contract is deployed.
pub const DEFAULT_TEST_NETWORK: &str = "rinkeby";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Wallet connector settings (provider options, caching).
    pub wallet: WalletConfig,

    /// Blockchain client settings.
    pub blockchain: BlockchainConfig,

    /// Page behavior.
    pub ui: UiConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet connector configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// Remember the last selected provider and reuse it on the next connect.
    pub cache_provider: bool,

    /// Hide the built-in `injected` provider option.
    pub disable_injected_provider: bool,

    /// Additional provider options offered by the connector.
    pub providers: Vec<ProviderOptionConfig>,
}

/// One selectable wallet provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderOptionConfig {
    /// Name used to select this provider.
    pub name: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Environment variable holding the hex private key.
    pub private_key_env: String,

    /// Interval between chain id polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    4000
}

/// Blockchain client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Ticket token contract address.
    pub contract_address: String,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: 10,
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
        }
    }
}

/// Where operation feedback is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackMode {
    /// Failures open an alert dialog; hashes go to `#txhash`.
    #[default]
    Alert,
    /// Failures and hashes are written to `#status`.
    Status,
}

/// Page behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// How create-token results are surfaced.
    pub feedback: FeedbackMode,

    /// Disable `#btn-create-token` while a transaction is being submitted.
    pub disable_submit_while_pending: bool,

    /// Network name on which the create-token control is shown.
    pub test_network: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            feedback: FeedbackMode::Alert,
            disable_submit_while_pending: false,
            test_network: DEFAULT_TEST_NETWORK.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
