//! Fixtures - static seed records for a fresh or reset store.

use std::collections::BTreeMap;

use crate::collection::Collection;
use crate::document::{into_document, Document};
use crate::error::StoreError;
use crate::record::Record;
use crate::state::StoreState;

/// Seed documents per collection. Collections without fixtures seed empty.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    seeds: BTreeMap<Collection, Vec<Document>>,
}

impl Fixtures {
    /// No seed data at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seed `collection` with raw documents.
    pub fn with(mut self, collection: Collection, docs: Vec<Document>) -> Self {
        self.seeds.insert(collection, docs);
        self
    }

    /// Seed `R::COLLECTION` with typed records.
    pub fn with_records<R: Record>(self, records: &[R]) -> Result<Self, StoreError> {
        let docs = records
            .iter()
            .map(|record| {
                let value = serde_json::to_value(record)?;
                into_document(value).ok_or_else(|| {
                    StoreError::InvalidRecord(format!(
                        "{} fixture does not serialize to an object",
                        R::COLLECTION
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with(R::COLLECTION, docs))
    }

    /// Seed documents for one collection.
    pub fn get(&self, collection: Collection) -> &[Document] {
        self.seeds
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Build a fresh state holding exactly the fixture records.
    pub fn to_state(&self) -> StoreState {
        let mut state = StoreState::new();
        for (collection, docs) in &self.seeds {
            state.set_records(*collection, docs.clone());
        }
        state
    }
}
