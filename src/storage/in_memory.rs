//! InMemoryStorage - HashMap-backed slots for testing and development.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

use super::Storage;

/// In-memory key-value slots.
///
/// Clone-friendly via Arc: clones share the same slots, so a store can be
/// dropped and reopened over the same "persisted" data.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> io::Error {
    io::Error::other("in-memory storage lock poisoned")
}

impl Storage for InMemoryStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
