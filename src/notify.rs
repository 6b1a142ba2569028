//! Change broadcast - the store's own observer list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::collection::Collection;
use crate::error::StoreError;

/// What kind of mutation triggered a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    Cleared,
    Reset,
    /// State was re-read from storage written by another store.
    Reloaded,
}

/// Notification delivered to subscribers after a mutation has been persisted.
///
/// `collection` is `None` for store-wide changes (`clear`, `reset`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreChange {
    pub kind: ChangeKind,
    pub collection: Option<Collection>,
}

impl StoreChange {
    pub fn on(kind: ChangeKind, collection: Collection) -> Self {
        Self {
            kind,
            collection: Some(collection),
        }
    }

    pub fn store_wide(kind: ChangeKind) -> Self {
        Self {
            kind,
            collection: None,
        }
    }

    /// Whether this change may have touched `collection`.
    pub fn affects(&self, collection: Collection) -> bool {
        self.collection.map_or(true, |c| c == collection)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&StoreChange) + Send + Sync>;

/// Ordered list of change listeners.
///
/// Listeners are called synchronously, in subscription order. The list is
/// copied before delivery, so a listener may subscribe or unsubscribe (and
/// read the store) from inside its callback.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionId, StoreError>
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self
            .listeners
            .write()
            .map_err(|_| StoreError::LockPoisoned("subscribe"))?;
        listeners.push((id, Arc::new(listener)));
        Ok(id)
    }

    /// Remove a listener. Returns true if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        let mut listeners = self
            .listeners
            .write()
            .map_err(|_| StoreError::LockPoisoned("unsubscribe"))?;
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        Ok(listeners.len() != before)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `change` to every listener registered at call time.
    pub fn notify(&self, change: &StoreChange) -> Result<(), StoreError> {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .map_err(|_| StoreError::LockPoisoned("notify"))?
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(?change, listeners = listeners.len(), "broadcasting store change");
        for listener in listeners {
            listener(change);
        }
        Ok(())
    }
}
