//! A client-side record store for procurement consoles.
//!
//! Named collections of JSON records, persisted as one document into a
//! key-value slot after every mutation, with a change broadcast that keeps
//! reactive [`CollectionView`]s in sync.
//!
//! ```ignore
//! use procure_store::{procurement, Collection, CollectionView, InMemoryStorage, RecordStore, Tender};
//!
//! let store = RecordStore::with_fixtures(InMemoryStorage::new(), procurement::seed_fixtures()?)?;
//! let open = CollectionView::new(&store, Collection::Tenders)
//!     .with_filter(|doc| doc.get("status").is_some_and(|s| s == "published"));
//! let tenders: Vec<Tender> = store.records::<Tender>().all()?;
//! ```

// Lets `#[derive(Record)]` expand to `procure_store::...` paths inside this crate too.
extern crate self as procure_store;

mod collection;
mod config;
mod document;
mod error;
mod fixtures;
mod notify;
pub mod procurement;
mod record;
mod state;
mod storage;
mod store;
mod view;

#[cfg(feature = "emitter")]
pub mod emitter;

pub use collection::Collection;
pub use config::{StoreConfig, DEFAULT_STORAGE_KEY};
pub use document::{document_id, merge_fields, next_id, Document, RecordId, ID_FIELD};
pub use error::StoreError;
pub use fixtures::Fixtures;
pub use notify::{ChangeKind, ChangeNotifier, StoreChange, SubscriptionId};
pub use procurement::{Committee, Complaint, Evaluation, Tender, Vendor};
pub use record::{Record, RecordRepository};
pub use state::StoreState;
pub use storage::{FileStorage, InMemoryStorage, Storage};
pub use store::{RecordStore, WeakRecordStore};
pub use view::{CollectionView, Filter, ViewState};

// Derive macro for `Record`
pub use procure_store_macros::Record;

#[cfg(feature = "emitter")]
pub use emitter::{EmitterBridge, STORE_CHANGED};
