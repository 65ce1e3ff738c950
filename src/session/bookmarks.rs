//! Saved references.

use serde::{Deserialize, Serialize};

use crate::domain::reference::Reference;

/// Deduplicated set of saved references, most recently added first.
///
/// Membership is exact canonical-string equality. Re-adding an existing
/// bookmark is a no-op and does not move it to the front. Serializes as a
/// bare JSON array of canonical reference strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet {
    references: Vec<Reference>,
}

impl BookmarkSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a reference at the front if it is not already saved.
    ///
    /// Returns `true` when the set changed.
    pub fn add(&mut self, reference: Reference) -> bool {
        if self.references.contains(&reference) {
            return false;
        }
        self.references.insert(0, reference);
        true
    }

    /// Removes a reference by exact match.
    ///
    /// Returns `true` when the set changed.
    pub fn remove(&mut self, reference: &Reference) -> bool {
        let before = self.references.len();
        self.references.retain(|saved| saved != reference);
        self.references.len() != before
    }

    /// Whether the reference is saved.
    #[must_use]
    pub fn contains(&self, reference: &Reference) -> bool {
        self.references.contains(reference)
    }

    /// Saved references, most recently added first.
    #[must_use]
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Number of saved references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_adding_keeps_original_position() {
        let mut bookmarks = BookmarkSet::new();
        let first = Reference::new("Genesis", 1, Some(1));
        let second = Reference::new("Exodus", 2, Some(3));

        assert!(bookmarks.add(first.clone()));
        assert!(bookmarks.add(second.clone()));
        assert!(!bookmarks.add(first.clone()));

        assert_eq!(bookmarks.references(), &[second, first]);
    }

    #[test]
    fn remove_matches_exact_reference() {
        let mut bookmarks = BookmarkSet::new();
        let with_verse = Reference::new("John", 3, Some(16));
        let without_verse = Reference::new("John", 3, None);
        bookmarks.add(with_verse.clone());
        bookmarks.add(without_verse.clone());

        assert!(bookmarks.remove(&with_verse));
        assert!(!bookmarks.remove(&with_verse));
        assert!(bookmarks.contains(&without_verse));
    }

    #[test]
    fn serializes_as_canonical_strings() {
        let mut bookmarks = BookmarkSet::new();
        bookmarks.add(Reference::new("Song of Solomon", 2, Some(4)));

        let json = serde_json::to_string(&bookmarks).unwrap();
        assert_eq!(json, r#"["Song of Solomon 2:4"]"#);

        let restored: BookmarkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, bookmarks);
    }
}
