//! Storage - the persistent key-value slot the store serializes into.
//!
//! A store owns one slot, addressed by its configured key, and rewrites the
//! whole state document into it after every mutation.

mod file;
mod in_memory;

use std::io;

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;

/// A string key-value slot store.
///
/// Writes are all-or-nothing: after `set_item` returns `Ok`, `get_item`
/// yields exactly the new value; after an `Err`, the previous value.
pub trait Storage: Send + Sync {
    /// Read the value under `key`. Returns None if the slot is empty.
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the value under `key`.
    fn set_item(&self, key: &str, value: &str) -> io::Result<()>;
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set_item(key, value)
    }
}
