//! Persistence backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the
//! host's persistence mechanism. The subsystem only ever reads and writes
//! opaque string values under string keys; the storage medium (a JSON file, a
//! browser-style local storage bridged over IPC, an in-memory map in tests)
//! is the host's choice.
//!
//! # Design Philosophy
//!
//! The trait is deliberately minimal: no transactions, no atomic multi-key
//! writes, no typed columns. Every persisted structure is serialized whole
//! into a single value, and in-memory state remains the source of truth for
//! the running session.

use crate::domain::error::Result;

/// Abstraction over key/value persistence backends.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): single JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): plain in-memory map, nothing persisted
///
/// # Examples
///
/// ```
/// use scriptura::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("bibleCurrentBook", "Genesis").unwrap();
/// assert_eq!(store.get("bibleCurrentBook"), Some("Genesis".to_string()));
/// assert_eq!(store.get("missing"), None);
/// ```
pub trait KeyValueStore: Send {
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `None` when the key has never been written.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written. Callers
    /// mutating session state treat such failures as best-effort and do not
    /// roll back the in-memory mutation.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
