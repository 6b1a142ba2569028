//! RecordRepository - typed accessor for one record type.

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use super::Record;
use crate::document::{into_document, Document, RecordId};
use crate::error::StoreError;
use crate::storage::Storage;
use crate::store::RecordStore;

/// Typed repository over `R::COLLECTION`.
///
/// Obtained with `store.records::<R>()`. Documents that no longer decode as
/// `R` are skipped by list operations and reported by `get`.
pub struct RecordRepository<'a, S, R> {
    store: &'a RecordStore<S>,
    _marker: PhantomData<R>,
}

impl<'a, S: Storage, R: Record> RecordRepository<'a, S, R> {
    pub fn new(store: &'a RecordStore<S>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// All records, in insertion order.
    pub fn all(&self) -> Result<Vec<R>, StoreError> {
        Ok(decode_all(self.store.get_all(R::COLLECTION)?))
    }

    /// Get a record by id.
    pub fn get(&self, id: RecordId) -> Result<Option<R>, StoreError> {
        self.store
            .get_by_id(R::COLLECTION, id)?
            .map(decode)
            .transpose()
    }

    /// Records matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    /// First record matching a predicate.
    pub fn find_one(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Option<R>, StoreError> {
        Ok(self.all()?.into_iter().find(|record| predicate(record)))
    }

    /// Create a record from `fields`, which must serialize to a JSON object.
    /// The store assigns the id.
    pub fn create<F: Serialize + ?Sized>(&self, fields: &F) -> Result<R, StoreError> {
        let created = self.store.create(R::COLLECTION, encode::<F, R>(fields)?)?;
        decode(created)
    }

    /// Shallow-merge `partial` over the record with `id`.
    pub fn update<F: Serialize + ?Sized>(
        &self,
        id: RecordId,
        partial: &F,
    ) -> Result<Option<R>, StoreError> {
        self.store
            .update(R::COLLECTION, id, encode::<F, R>(partial)?)?
            .map(decode)
            .transpose()
    }

    /// Delete a record by id. Returns true if it existed.
    pub fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        self.store.delete(R::COLLECTION, id)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.store.count(R::COLLECTION)
    }
}

fn encode<F: Serialize + ?Sized, R: Record>(fields: &F) -> Result<Document, StoreError> {
    into_document(serde_json::to_value(fields)?).ok_or_else(|| {
        StoreError::InvalidRecord(format!(
            "fields for {} do not serialize to an object",
            R::COLLECTION
        ))
    })
}

fn decode<R: Record>(doc: Document) -> Result<R, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

pub(crate) fn decode_all<R: Record>(docs: Vec<Document>) -> Vec<R> {
    docs.into_iter()
        .filter_map(|doc| match decode::<R>(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(collection = %R::COLLECTION, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect()
}
