//! Named page elements.

use std::fmt;

/// Every element the controller reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    BtnConnect,
    BtnDisconnect,
    BtnCreateToken,
    NetworkName,
    CreateToken,
    SelectedAccount,
    AccountBalance,
    Prepare,
    Connected,
    TokenRecipient,
    Ticket,
    TxHash,
    Status,
}

impl ElementId {
    pub const ALL: [ElementId; 13] = [
        ElementId::BtnConnect,
        ElementId::BtnDisconnect,
        ElementId::BtnCreateToken,
        ElementId::NetworkName,
        ElementId::CreateToken,
        ElementId::SelectedAccount,
        ElementId::AccountBalance,
        ElementId::Prepare,
        ElementId::Connected,
        ElementId::TokenRecipient,
        ElementId::Ticket,
        ElementId::TxHash,
        ElementId::Status,
    ];

    /// DOM id of the element.
    pub fn id(self) -> &'static str {
        match self {
            ElementId::BtnConnect => "btn-connect",
            ElementId::BtnDisconnect => "btn-disconnect",
            ElementId::BtnCreateToken => "btn-create-token",
            ElementId::NetworkName => "network-name",
            ElementId::CreateToken => "create-token",
            ElementId::SelectedAccount => "selected-account",
            ElementId::AccountBalance => "account-balance",
            ElementId::Prepare => "prepare",
            ElementId::Connected => "connected",
            ElementId::TokenRecipient => "token-recipient",
            ElementId::Ticket => "ticket",
            ElementId::TxHash => "txhash",
            ElementId::Status => "status",
        }
    }

    /// Look an element up by DOM id, with or without the leading `#`.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.strip_prefix('#').unwrap_or(id);
        Self::ALL.into_iter().find(|e| e.id() == id)
    }

    /// Whether the element is hidden when the page first loads.
    pub fn hidden_on_load(self) -> bool {
        matches!(self, ElementId::Connected | ElementId::CreateToken)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id())
    }
}
