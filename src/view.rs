//! CollectionView - a live, optionally filtered snapshot of one collection.
//!
//! A view loads its snapshot when activated and subscribes to the store's
//! change broadcast. Every broadcast triggers an unconditional reload, so
//! views bound to the same collection converge after their next reload.
//!
//! ```text
//!   Unbound --activate--> Loading --> Live --deactivate--> Unbound
//!                                     |  ^
//!                                     +--+ mutation / broadcast reload
//! ```

use std::sync::{Arc, RwLock};

use crate::collection::Collection;
use crate::document::{document_id, Document, RecordId};
use crate::error::StoreError;
use crate::notify::SubscriptionId;
use crate::record::{decode_all, Record};
use crate::storage::Storage;
use crate::store::RecordStore;

/// Predicate selecting which records a view holds.
pub type Filter = Arc<dyn Fn(&Document) -> bool + Send + Sync>;

/// Lifecycle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unbound,
    Loading,
    Live,
}

/// Snapshot shared between the view and its broadcast listener.
#[derive(Default)]
struct Snapshot {
    records: RwLock<Vec<Document>>,
}

impl Snapshot {
    fn replace(&self, records: Vec<Document>) -> Result<(), StoreError> {
        *self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("view snapshot"))? = records;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Vec<Document>)) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("view snapshot"))?;
        f(&mut records);
        Ok(())
    }

    fn read(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("view snapshot"))?
            .clone())
    }
}

fn load<S: Storage>(
    store: &RecordStore<S>,
    collection: Collection,
    filter: Option<&Filter>,
) -> Result<Vec<Document>, StoreError> {
    match filter {
        Some(filter) => store.query(collection, &|doc| filter(doc)),
        None => store.get_all(collection),
    }
}

/// Reactive binding over one collection of a `RecordStore`.
///
/// Mutations go through the store; the view then reconciles its snapshot
/// from the value the store returned. The store's broadcast refreshes every
/// other live view.
pub struct CollectionView<S: Storage + 'static> {
    store: RecordStore<S>,
    collection: Collection,
    filter: Option<Filter>,
    snapshot: Arc<Snapshot>,
    subscription: Option<SubscriptionId>,
    state: ViewState,
}

impl<S: Storage + 'static> CollectionView<S> {
    /// An unbound view over every record of `collection`.
    pub fn new(store: &RecordStore<S>, collection: Collection) -> Self {
        Self {
            store: store.clone(),
            collection,
            filter: None,
            snapshot: Arc::new(Snapshot::default()),
            subscription: None,
            state: ViewState::Unbound,
        }
    }

    /// Restrict the view to records matching `filter`.
    ///
    /// Takes effect on the next load.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Document) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Create and activate a view in one step.
    pub fn bind(store: &RecordStore<S>, collection: Collection) -> Result<Self, StoreError> {
        let mut view = Self::new(store, collection);
        view.activate()?;
        Ok(view)
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == ViewState::Live
    }

    /// Load the snapshot and subscribe to store changes. No-op when live.
    pub fn activate(&mut self) -> Result<(), StoreError> {
        if self.state == ViewState::Live {
            return Ok(());
        }

        self.state = ViewState::Loading;
        if let Err(e) = self.attach() {
            self.state = ViewState::Unbound;
            return Err(e);
        }
        self.state = ViewState::Live;

        tracing::debug!(collection = %self.collection, "collection view live");
        Ok(())
    }

    fn attach(&mut self) -> Result<(), StoreError> {
        self.snapshot
            .replace(load(&self.store, self.collection, self.filter.as_ref())?)?;

        let weak = self.store.downgrade();
        let snapshot = Arc::clone(&self.snapshot);
        let filter = self.filter.clone();
        let collection = self.collection;

        let id = self.store.subscribe(move |_change| {
            let Some(store) = weak.upgrade() else {
                return;
            };
            let reloaded = load(&store, collection, filter.as_ref())
                .and_then(|records| snapshot.replace(records));
            if let Err(e) = reloaded {
                tracing::warn!(%collection, error = %e, "collection view reload failed");
            }
        })?;
        self.subscription = Some(id);
        Ok(())
    }

    /// Drop the subscription. The last snapshot stays readable.
    pub fn deactivate(&mut self) -> Result<(), StoreError> {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id)?;
        }
        self.state = ViewState::Unbound;
        Ok(())
    }

    /// Reload the snapshot from the store now.
    pub fn reload(&self) -> Result<(), StoreError> {
        self.snapshot
            .replace(load(&self.store, self.collection, self.filter.as_ref())?)
    }

    /// Current snapshot.
    pub fn records(&self) -> Result<Vec<Document>, StoreError> {
        self.snapshot.read()
    }

    /// Current snapshot decoded as `R`. Undecodable documents are skipped.
    pub fn records_as<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        Ok(decode_all(self.records()?))
    }

    pub fn len(&self) -> usize {
        self.records().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look a record up in the store. Does not consult or touch the snapshot.
    pub fn get_by_id(&self, id: RecordId) -> Result<Option<Document>, StoreError> {
        self.store.get_by_id(self.collection, id)
    }

    /// Create through the store, then place the stored record in the snapshot.
    pub fn create(&self, fields: Document) -> Result<Document, StoreError> {
        let created = self.store.create(self.collection, fields)?;
        self.reconcile(&created)?;
        Ok(created)
    }

    /// Update through the store; on success, replace the snapshot entry.
    pub fn update(&self, id: RecordId, partial: Document) -> Result<Option<Document>, StoreError> {
        let updated = self.store.update(self.collection, id, partial)?;
        if let Some(record) = &updated {
            self.reconcile(record)?;
        }
        Ok(updated)
    }

    /// Delete through the store; on success, drop the snapshot entry.
    pub fn remove(&self, id: RecordId) -> Result<bool, StoreError> {
        let removed = self.store.delete(self.collection, id)?;
        if removed && self.is_live() {
            self.snapshot
                .modify(|records| records.retain(|doc| document_id(doc) != Some(id)))?;
        }
        Ok(removed)
    }

    /// Reset the store to fixtures and reload.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.store.reset()?;
        self.refresh()
    }

    /// Clear the store and reload.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.refresh()
    }

    fn refresh(&self) -> Result<(), StoreError> {
        if self.is_live() {
            self.reload()?;
        }
        Ok(())
    }

    /// Upsert `record` into the snapshot by id, honouring the filter.
    ///
    /// Idempotent: the broadcast reload may already have placed it.
    fn reconcile(&self, record: &Document) -> Result<(), StoreError> {
        if !self.is_live() {
            return Ok(());
        }

        let id = document_id(record);
        let keep = self.filter.as_ref().map_or(true, |filter| filter(record));
        self.snapshot.modify(|records| {
            let position = records.iter().position(|doc| document_id(doc) == id);
            match (position, keep) {
                (Some(index), true) => records[index] = record.clone(),
                (None, true) => records.push(record.clone()),
                (Some(index), false) => {
                    records.remove(index);
                }
                (None, false) => {}
            }
        })
    }
}

impl<S: Storage + 'static> Drop for CollectionView<S> {
    fn drop(&mut self) {
        if let Err(e) = self.deactivate() {
            tracing::warn!(collection = %self.collection, error = %e, "failed to unsubscribe view");
        }
    }
}
