//! Account change notifications.
//!
//! Successful unlink and verification publish an [`AccountEvent`] instead of
//! reloading the whole view. Anything that renders account-dependent data
//! subscribes and re-fetches.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  AccountEvent                                 │
//! │  ├── Linked: new external account created     │
//! │  ├── Unlinked: account removed on the server  │
//! │  └── Verified: pending account now active     │
//! └───────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 32;

/// Something changed on the server that invalidates account listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    Linked {
        linked_account_id: Option<String>,
    },
    Unlinked {
        account_type: String,
        account_id: String,
    },
    Verified {
        ach_id: String,
    },
}

/// Broadcast hub for [`AccountEvent`]s.
#[derive(Debug, Clone)]
pub struct AccountEvents {
    sender: broadcast::Sender<AccountEvent>,
}

impl Default for AccountEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: AccountEvent) {
        tracing::info!(?event, "accounts changed");
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AccountEvent> {
        self.sender.subscribe()
    }
}
