//! Provider change events and their subscriptions.

use std::fmt;

use alloy::primitives::Address;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Kind of change a provider can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Accounts,
    Chain,
    Network,
}

impl EventKind {
    /// Every kind, in subscription order.
    pub const ALL: [EventKind; 3] = [EventKind::Accounts, EventKind::Chain, EventKind::Network];

    /// Wallet event name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Accounts => "accountsChanged",
            EventKind::Chain => "chainChanged",
            EventKind::Network => "networkChanged",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change announced by the connected provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
    NetworkChanged(u64),
}

impl ProviderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ProviderEvent::AccountsChanged(_) => EventKind::Accounts,
            ProviderEvent::ChainChanged(_) => EventKind::Chain,
            ProviderEvent::NetworkChanged(_) => EventKind::Network,
        }
    }
}

/// Fan-out of provider events to any number of subscriptions.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ProviderEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. Returns how many subscriptions will see it.
    pub fn emit(&self, event: ProviderEvent) -> usize {
        tracing::debug!(event = %event.kind(), "Provider event");
        self.tx.send(event).unwrap_or(0)
    }

    /// Register interest in one kind of event.
    pub fn subscribe(&self, kind: EventKind) -> Subscription {
        Subscription {
            kind,
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Handle for one event kind. Dropping it releases the subscription.
#[derive(Debug)]
pub struct Subscription {
    kind: EventKind,
    rx: broadcast::Receiver<ProviderEvent>,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Wait for the next event of this subscription's kind.
    ///
    /// Returns `None` once the provider has gone away.
    pub async fn recv(&mut self) -> Option<ProviderEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.kind() == self.kind => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(kind = %self.kind, skipped, "Subscription lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
