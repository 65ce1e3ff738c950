//! In-memory corpus cache.

use std::collections::HashMap;

use crate::domain::corpus::Corpus;

/// Map of translation identifier to parsed corpus.
///
/// Pure data holder with no I/O: the loader populates it, navigation and
/// search read from it. Entries live for the process lifetime; `put` is an
/// idempotent overwrite and performs no validation beyond the parse that
/// produced the corpus.
#[derive(Debug, Default)]
pub struct CorpusRepository {
    corpora: HashMap<String, Corpus>,
}

impl CorpusRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached corpus for a translation, if loaded.
    pub fn get(&self, translation_id: &str) -> Option<&Corpus> {
        self.corpora.get(translation_id)
    }

    /// Caches a corpus under its own translation identifier, replacing any
    /// previous entry.
    pub fn put(&mut self, corpus: Corpus) {
        tracing::debug!(
            translation_id = %corpus.translation_id,
            books = corpus.books.len(),
            "caching corpus"
        );
        self.corpora.insert(corpus.translation_id.clone(), corpus);
    }

    /// Whether a corpus is cached for the translation.
    #[must_use]
    pub fn contains(&self, translation_id: &str) -> bool {
        self.corpora.contains_key(translation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(id: &str) -> Corpus {
        Corpus {
            translation_id: id.to_string(),
            books: Vec::new(),
        }
    }

    #[test]
    fn get_returns_cached_corpus() {
        let mut repository = CorpusRepository::new();
        assert!(repository.get("KJV").is_none());

        repository.put(corpus("KJV"));
        assert_eq!(repository.get("KJV").unwrap().translation_id, "KJV");
        assert!(repository.contains("KJV"));
        assert!(!repository.contains("TWI"));
    }

    #[test]
    fn put_overwrites_existing_entry() {
        let mut repository = CorpusRepository::new();
        repository.put(corpus("KJV"));

        let replacement = Corpus::from_json(
            "KJV",
            r#"{ "books": [ { "name": "Genesis", "chapters": [] } ] }"#,
        )
        .unwrap();
        repository.put(replacement);

        assert_eq!(repository.get("KJV").unwrap().books.len(), 1);
    }
}
