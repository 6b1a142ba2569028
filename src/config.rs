//! StoreConfig - how a store finds and seeds its persisted state.

use serde::Deserialize;

/// Slot key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "procurement_store";

/// Configuration for `RecordStore::open`.
///
/// Deserializable so applications can keep it in their own config files:
///
/// ```ignore
/// let config: StoreConfig = serde_json::from_str(r#"{"storage_key":"demo"}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key of the storage slot holding the state document.
    pub storage_key: String,
    /// Seed from fixtures when the slot is empty. When false, start empty.
    pub seed_fixtures: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_fixtures: true,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Start from an empty state instead of fixtures when nothing is persisted.
    pub fn without_seed(mut self) -> Self {
        self.seed_fixtures = false;
        self
    }
}
