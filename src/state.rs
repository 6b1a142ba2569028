//! StoreState - every collection's records, persisted as one JSON document.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::collection::Collection;
use crate::document::{into_document, Document};
use crate::error::StoreError;

/// The aggregate of all collections.
///
/// Serialized as a single JSON object whose keys are collection names and
/// whose values are arrays of records. A collection missing from the map is
/// treated as empty.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    collections: BTreeMap<Collection, Vec<Document>>,
}

impl PartialEq for StoreState {
    fn eq(&self, other: &Self) -> bool {
        Collection::ALL
            .into_iter()
            .all(|c| self.records(c) == other.records(c))
    }
}

impl StoreState {
    /// A state with every collection empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of a collection, in insertion order.
    pub fn records(&self, collection: Collection) -> &[Document] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn records_mut(&mut self, collection: Collection) -> &mut Vec<Document> {
        self.collections.entry(collection).or_default()
    }

    /// Replace the records of one collection.
    pub fn set_records(&mut self, collection: Collection, records: Vec<Document>) {
        self.collections.insert(collection, records);
    }

    /// Total number of records across all collections.
    pub fn len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the whole state. Every known collection is written, empty
    /// ones as `[]`.
    pub fn to_json(&self) -> Result<String, StoreError> {
        let mut root = Map::new();
        for collection in Collection::ALL {
            let records = self
                .records(collection)
                .iter()
                .cloned()
                .map(Value::Object)
                .collect();
            root.insert(collection.as_str().to_string(), Value::Array(records));
        }
        Ok(serde_json::to_string(&Value::Object(root))?)
    }

    /// Parse a persisted document.
    ///
    /// Collection names outside the known set are dropped with a warning.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(root) = root else {
            return Err(StoreError::Corrupt("top level is not an object".into()));
        };

        let mut state = StoreState::new();
        for (name, value) in root {
            let collection = match name.parse::<Collection>() {
                Ok(collection) => collection,
                Err(_) => {
                    tracing::warn!(collection = %name, "dropping unknown collection from persisted state");
                    continue;
                }
            };

            let Value::Array(items) = value else {
                return Err(StoreError::Corrupt(format!(
                    "collection {} is not an array",
                    name
                )));
            };

            let records = items
                .into_iter()
                .map(|item| {
                    into_document(item).ok_or_else(|| {
                        StoreError::Corrupt(format!("collection {} holds a non-object record", name))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            state.set_records(collection, records);
        }

        Ok(state)
    }
}
