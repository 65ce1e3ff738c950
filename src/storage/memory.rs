//! In-memory persistence backend.

use std::collections::HashMap;

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;

/// Key/value store backed by a plain map.
///
/// Nothing survives the process; intended for tests and for hosts that bridge
/// persistence to their own mechanism and only need a scratch store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
