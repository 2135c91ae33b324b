//! Change notifications for completed syncs

use promptsync_common::constants::CHANGE_CHANNEL_CAPACITY;
use promptsync_common::Category;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::debug;

/// A rules file now holds `content`. Fired once per successful push, after
/// the write returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesChanged {
    pub category: Category,
    pub path: PathBuf,
    pub content: String,
}

/// Multi-subscriber broadcast of [`RulesChanged`] events
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<RulesChanged>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RulesChanged> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Deliver to current subscribers. Having none is not an error.
    pub fn emit(&self, event: RulesChanged) {
        match self.tx.send(event) {
            Ok(receivers) => debug!("Delivered rules change to {} subscriber(s)", receivers),
            Err(_) => debug!("No subscribers for rules change"),
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(CHANGE_CHANNEL_CAPACITY)
    }
}
