use std::sync::{Arc, Mutex};

use event_emitter_rs::EventEmitter;

use crate::error::StoreError;
use crate::notify::SubscriptionId;
use crate::storage::Storage;
use crate::store::RecordStore;

/// Event name used for forwarded store changes.
pub const STORE_CHANGED: &str = "store:changed";

/// Forwards store changes onto an `EventEmitter`.
///
/// Each persisted mutation is emitted as `STORE_CHANGED` with the JSON-encoded
/// `StoreChange` as payload. Emission is asynchronous, so emitter listeners
/// run after the store call has returned.
pub struct EmitterBridge<S: Storage + 'static> {
    store: RecordStore<S>,
    emitter: Arc<Mutex<EventEmitter>>,
    subscription: Option<SubscriptionId>,
}

impl<S: Storage + 'static> EmitterBridge<S> {
    /// Subscribe `emitter` to `store`.
    pub fn attach(store: &RecordStore<S>, emitter: EventEmitter) -> Result<Self, StoreError> {
        let emitter = Arc::new(Mutex::new(emitter));
        let sink = Arc::clone(&emitter);

        let subscription = store.subscribe(move |change| {
            let payload = match serde_json::to_string(change) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to encode store change");
                    return;
                }
            };
            match sink.lock() {
                Ok(mut emitter) => {
                    emitter.emit(STORE_CHANGED, payload);
                }
                Err(_) => tracing::warn!("event emitter lock poisoned; dropping store change"),
            }
        })?;

        Ok(Self {
            store: store.clone(),
            emitter,
            subscription: Some(subscription),
        })
    }

    /// Shared handle to the wrapped emitter, for registering more listeners.
    pub fn emitter(&self) -> Arc<Mutex<EventEmitter>> {
        Arc::clone(&self.emitter)
    }

    /// Stop forwarding.
    pub fn detach(&mut self) -> Result<(), StoreError> {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id)?;
        }
        Ok(())
    }
}

impl<S: Storage + 'static> Drop for EmitterBridge<S> {
    fn drop(&mut self) {
        if let Err(e) = self.detach() {
            tracing::warn!(error = %e, "failed to unsubscribe emitter bridge");
        }
    }
}
