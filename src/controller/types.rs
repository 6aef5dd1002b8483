//! Controller state, actions and errors.

use thiserror::Error;

use crate::blockchain::{BlockchainError, EncodingError};
use crate::connector::WalletError;
use crate::ui::ElementId;

/// Where the controller is in the connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

/// A user action on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// `#btn-connect`, optionally naming the provider to use.
    Connect(Option<String>),
    /// `#btn-disconnect`.
    Disconnect,
    /// `#btn-create-token`.
    CreateToken,
    /// Re-read account data without a provider event.
    Refresh,
}

impl PageAction {
    /// Action bound to a button click, if the element is a button.
    pub fn from_click(id: ElementId) -> Option<Self> {
        match id {
            ElementId::BtnConnect => Some(PageAction::Connect(None)),
            ElementId::BtnDisconnect => Some(PageAction::Disconnect),
            ElementId::BtnCreateToken => Some(PageAction::CreateToken),
            _ => None,
        }
    }
}

/// Inputs of one create-token submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub recipient_address: String,
    pub ticket_value: String,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("no wallet connected")]
    NotConnected,

    #[error("already connected to '{0}'")]
    AlreadyConnected(String),

    #[error("format ticket value error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("invalid recipient address '{address}': {reason}")]
    InvalidRecipient { address: String, reason: String },

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
