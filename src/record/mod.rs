//! Records - typed access to store collections.
//!
//! The store itself holds untyped JSON documents. A `Record` type binds a
//! Rust struct to one `Collection`, so callers can read and write it without
//! touching `Document` directly.
//!
//! ## Example
//!
//! ```ignore
//! use procure_store::{Record, RecordId};
//!
//! #[derive(Serialize, Deserialize, Clone, Record)]
//! #[record(collection = Vendors)]
//! struct Vendor {
//!     pub id: RecordId,
//!     pub name: String,
//! }
//!
//! let vendor: Vendor = store.records::<Vendor>().create(&NewVendor { name: "Acme".into() })?;
//! let loaded = store.records::<Vendor>().get(vendor.id)?;
//! ```

mod repository;

use serde::{de::DeserializeOwned, Serialize};

use crate::collection::Collection;
use crate::document::RecordId;

/// Trait for types stored as records of one collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection this record type lives in.
    const COLLECTION: Collection;

    /// The record's identifier within its collection.
    fn id(&self) -> RecordId;
}

pub(crate) use repository::decode_all;
pub use repository::RecordRepository;
