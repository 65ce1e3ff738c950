//! Bounded visit history.

use serde::{Deserialize, Serialize};

use crate::domain::reference::Reference;

/// Maximum number of entries the log retains.
pub const HISTORY_CAP: usize = 20;

/// One recorded visit: where, and when in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The visited reference.
    pub reference: Reference,

    /// When the visit was recorded, as a Unix timestamp in milliseconds.
    pub timestamp: i64,
}

/// Capped visit log, most recent first.
///
/// Appends prepend a timestamped entry and drop everything beyond
/// [`HISTORY_CAP`]. Repeated visits produce repeated entries; the cap is the
/// only eviction rule. Serializes as a bare JSON array of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit at the front of the log, evicting past the cap.
    pub fn append(&mut self, reference: Reference) {
        self.entries.insert(
            0,
            HistoryEntry {
                reference,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        );
        self.entries.truncate(HISTORY_CAP);
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
