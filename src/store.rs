//! RecordStore - the single source of truth for every collection.
//!
//! Synchronous CRUD plus linear-scan queries over named collections. After
//! every mutation the whole state is serialized into one storage slot, and
//! only then is the change broadcast to subscribers.

use std::sync::{Arc, RwLock, RwLockReadGuard, Weak};

use crate::collection::Collection;
use crate::config::StoreConfig;
use crate::document::{document_id, merge_fields, next_id, with_id, Document, RecordId};
use crate::error::StoreError;
use crate::fixtures::Fixtures;
use crate::notify::{ChangeKind, ChangeNotifier, StoreChange, SubscriptionId};
use crate::record::{Record, RecordRepository};
use crate::state::StoreState;
use crate::storage::Storage;

/// Outcome of a mutation applied to a working copy of the state.
enum Applied<T> {
    /// The copy changed and must be persisted.
    Changed(T),
    /// Nothing changed; skip the write and the broadcast.
    Unchanged(T),
}

struct Inner<S> {
    state: RwLock<StoreState>,
    storage: S,
    storage_key: String,
    fixtures: Fixtures,
    notifier: ChangeNotifier,
}

/// Handle to a record store.
///
/// Construct one at startup with [`RecordStore::open`] and pass clones to
/// whatever needs it; clones share the same state, storage and subscribers.
pub struct RecordStore<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for RecordStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Non-owning store handle, used by subscribers that must not keep the
/// store alive.
pub struct WeakRecordStore<S> {
    inner: Weak<Inner<S>>,
}

impl<S> Clone for WeakRecordStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S> WeakRecordStore<S> {
    /// Returns None once every strong handle has been dropped.
    pub fn upgrade(&self) -> Option<RecordStore<S>> {
        self.inner.upgrade().map(|inner| RecordStore { inner })
    }
}

impl<S: Storage> RecordStore<S> {
    /// Open a store over `storage`.
    ///
    /// Loads the document under `config.storage_key` if present. Otherwise
    /// seeds from `fixtures` (or starts empty when seeding is disabled) and
    /// persists immediately.
    pub fn open(storage: S, fixtures: Fixtures, config: StoreConfig) -> Result<Self, StoreError> {
        let state = match storage.get_item(&config.storage_key)? {
            Some(json) => {
                let state = StoreState::from_json(&json)?;
                tracing::debug!(
                    key = %config.storage_key,
                    records = state.len(),
                    "loaded persisted store state"
                );
                state
            }
            None => {
                let state = if config.seed_fixtures {
                    fixtures.to_state()
                } else {
                    StoreState::new()
                };
                storage.set_item(&config.storage_key, &state.to_json()?)?;
                tracing::info!(
                    key = %config.storage_key,
                    records = state.len(),
                    "seeded store state"
                );
                state
            }
        };

        Ok(Self {
            inner: Arc::new(Inner {
                state: RwLock::new(state),
                storage,
                storage_key: config.storage_key,
                fixtures,
                notifier: ChangeNotifier::new(),
            }),
        })
    }

    /// Open with default config.
    pub fn with_fixtures(storage: S, fixtures: Fixtures) -> Result<Self, StoreError> {
        Self::open(storage, fixtures, StoreConfig::default())
    }

    /// Key of the storage slot this store persists into.
    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    pub fn downgrade(&self) -> WeakRecordStore<S> {
        WeakRecordStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Typed access to the collection holding `R`.
    pub fn records<R: Record>(&self) -> RecordRepository<'_, S, R> {
        RecordRepository::new(self)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.inner
            .state
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// All records of a collection, in insertion order.
    pub fn get_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        Ok(self.read()?.records(collection).to_vec())
    }

    /// First record whose `id` equals `id`.
    pub fn get_by_id(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .read()?
            .records(collection)
            .iter()
            .find(|doc| document_id(doc) == Some(id))
            .cloned())
    }

    /// Records for which `predicate` holds, in insertion order.
    pub fn query(
        &self,
        collection: Collection,
        predicate: &dyn Fn(&Document) -> bool,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .read()?
            .records(collection)
            .iter()
            .filter(|doc| predicate(doc))
            .cloned()
            .collect())
    }

    pub fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        Ok(self.read()?.records(collection).len())
    }

    /// Copy of the whole state.
    pub fn snapshot_state(&self) -> Result<StoreState, StoreError> {
        Ok(self.read()?.clone())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert a record with id `max(existing ids, 0) + 1`.
    ///
    /// Any `id` in `fields` is replaced by the assigned one.
    pub fn create(&self, collection: Collection, fields: Document) -> Result<Document, StoreError> {
        self.commit(
            "create",
            StoreChange::on(ChangeKind::Created, collection),
            |state| {
                let records = state.records_mut(collection);
                let record = with_id(fields, next_id(records));
                records.push(record.clone());
                Applied::Changed(record)
            },
        )
    }

    /// Shallow-merge `partial` over the record with `id`, keeping its position.
    ///
    /// Returns None, without writing, if no such record exists.
    pub fn update(
        &self,
        collection: Collection,
        id: RecordId,
        partial: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.commit(
            "update",
            StoreChange::on(ChangeKind::Updated, collection),
            |state| {
                let found = state
                    .records_mut(collection)
                    .iter_mut()
                    .find(|doc| document_id(doc) == Some(id));
                match found {
                    Some(record) => {
                        merge_fields(record, partial);
                        Applied::Changed(Some(record.clone()))
                    }
                    None => Applied::Unchanged(None),
                }
            },
        )
    }

    /// Remove the record with `id`. Returns whether something was removed.
    pub fn delete(&self, collection: Collection, id: RecordId) -> Result<bool, StoreError> {
        self.commit(
            "delete",
            StoreChange::on(ChangeKind::Deleted, collection),
            |state| {
                let records = state.records_mut(collection);
                match records.iter().position(|doc| document_id(doc) == Some(id)) {
                    Some(index) => {
                        records.remove(index);
                        Applied::Changed(true)
                    }
                    None => Applied::Unchanged(false),
                }
            },
        )
    }

    /// Empty every collection and persist the empty document.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.commit(
            "clear",
            StoreChange::store_wide(ChangeKind::Cleared),
            |state| {
                *state = StoreState::new();
                Applied::Changed(())
            },
        )?;
        tracing::info!(key = %self.inner.storage_key, "store cleared");
        Ok(())
    }

    /// Restore every collection to its fixture content and persist.
    pub fn reset(&self) -> Result<(), StoreError> {
        let fixtures = self.inner.fixtures.to_state();
        self.commit(
            "reset",
            StoreChange::store_wide(ChangeKind::Reset),
            |state| {
                *state = fixtures;
                Applied::Changed(())
            },
        )?;
        tracing::info!(key = %self.inner.storage_key, "store reset to fixtures");
        Ok(())
    }

    /// Re-read the storage slot, picking up writes made by another store
    /// sharing it. An empty slot leaves the in-memory state untouched.
    pub fn reload(&self) -> Result<bool, StoreError> {
        let Some(json) = self.inner.storage.get_item(&self.inner.storage_key)? else {
            return Ok(false);
        };
        let loaded = StoreState::from_json(&json)?;

        {
            let mut state = self
                .inner
                .state
                .write()
                .map_err(|_| StoreError::LockPoisoned("reload"))?;
            if *state == loaded {
                return Ok(false);
            }
            *state = loaded;
        }

        tracing::debug!(key = %self.inner.storage_key, "reloaded store state from storage");
        self.inner
            .notifier
            .notify(&StoreChange::store_wide(ChangeKind::Reloaded))?;
        Ok(true)
    }

    /// Apply `mutate` to a copy of the state and, if it reports a change,
    /// persist the copy and swap it in before broadcasting `change`.
    ///
    /// A failed write leaves both memory and storage as they were.
    fn commit<T>(
        &self,
        operation: &'static str,
        change: StoreChange,
        mutate: impl FnOnce(&mut StoreState) -> Applied<T>,
    ) -> Result<T, StoreError> {
        let output = {
            let mut state = self
                .inner
                .state
                .write()
                .map_err(|_| StoreError::LockPoisoned(operation))?;

            let mut next = state.clone();
            let output = match mutate(&mut next) {
                Applied::Changed(output) => output,
                Applied::Unchanged(output) => return Ok(output),
            };

            self.inner
                .storage
                .set_item(&self.inner.storage_key, &next.to_json()?)?;
            *state = next;
            output
        };

        tracing::debug!(operation, collection = ?change.collection, "persisted store state");
        self.inner.notifier.notify(&change)?;
        Ok(output)
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Register a listener called after every persisted mutation.
    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionId, StoreError>
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        self.inner.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        self.inner.notifier.unsubscribe(id)
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.notifier.len()
    }
}
