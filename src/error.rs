use std::io;

use thiserror::Error;

/// Errors surfaced by the record store and its views.
///
/// "Not found" is never an error: lookups return `Option`, deletes return `bool`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistent slot could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] io::Error),

    /// A record or the state document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The persisted document does not have the expected shape.
    #[error("persisted state is corrupt: {0}")]
    Corrupt(String),

    /// Caller-supplied fields that cannot be stored as a record.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A collection name outside the closed set was supplied as a string.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
