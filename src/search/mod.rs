//! Full-text search over a loaded corpus.
//!
//! Scans verses in document order (book, then chapter, then verse) and
//! returns the first [`RESULT_CAP`] matches. There is no ranking, stemming,
//! or fuzzy matching; two boolean flags select among four matching modes:
//!
//! - `exact_match && whole_words`: the query must appear as a whole word,
//!   matched with a word-boundary-anchored literal pattern
//! - `exact_match` only: case-insensitive substring
//! - `whole_words` only: any whitespace-separated word of the verse contains
//!   the query as a substring (a looser partial-word mode)
//! - neither: case-insensitive substring, the default fallback
//!
//! Literal `[` and `]` characters mark translator annotations in the source
//! text; both the query and the verse text have them stripped before
//! comparison, while results carry the original verse text for display.
//!
//! The empty-query short circuit inspects the raw query before annotation
//! stripping, so a query consisting only of brackets proceeds with an empty
//! cleaned term and matches every verse in the substring modes.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::corpus::Corpus;

/// Maximum number of results a search returns.
pub const RESULT_CAP: usize = 200;

/// One matching verse, in corpus coordinates.
///
/// Produced only, never persisted. `text` is the original verse text with
/// annotation brackets intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Name of the book the verse belongs to.
    pub book: String,

    /// Chapter number within the book.
    pub chapter: u32,

    /// Verse number within the chapter.
    pub verse: u32,

    /// Original verse text, annotations included.
    pub text: String,
}

/// Searches a corpus, returning at most [`RESULT_CAP`] results in document order.
///
/// An empty or whitespace-only query returns no results without traversing
/// the corpus. The caller is responsible for resolving the active corpus; a
/// translation that is not loaded yields an empty result set at that layer.
///
/// # Examples
///
/// ```
/// use scriptura::domain::Corpus;
/// use scriptura::search;
///
/// let corpus = Corpus::from_json("KJV", r#"{ "books": [ { "name": "Genesis", "chapters": [
///     { "chapter": 1, "verses": [ { "verse": 1, "text": "In [the] beginning God created" } ] }
/// ] } ] }"#).unwrap();
///
/// let results = search::search(&corpus, "the begin", false, false);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].text, "In [the] beginning God created");
///
/// assert!(search::search(&corpus, "begin", true, true).is_empty());
/// assert!(search::search(&corpus, "   ", false, false).is_empty());
/// ```
#[must_use]
pub fn search(corpus: &Corpus, term: &str, exact_match: bool, whole_words: bool) -> Vec<SearchResult> {
    if term.trim().is_empty() {
        return Vec::new();
    }

    let clean_term = strip_annotations(term).trim().to_lowercase();

    // Escaped literal, compiled once per search; cannot fail to compile.
    let word_regex = if exact_match && whole_words {
        Regex::new(&format!(r"\b{}\b", regex::escape(&clean_term))).ok()
    } else {
        None
    };

    let mut results = Vec::new();

    'books: for book in &corpus.books {
        for chapter in &book.chapters {
            for verse in &chapter.verses {
                let clean_text = strip_annotations(&verse.text).to_lowercase();

                let matched = match (exact_match, whole_words) {
                    (true, true) => word_regex.as_ref().is_some_and(|r| r.is_match(&clean_text)),
                    (false, true) => clean_text
                        .split_whitespace()
                        .any(|word| word.contains(clean_term.as_str())),
                    (true, false) | (false, false) => clean_text.contains(clean_term.as_str()),
                };

                if !matched {
                    continue;
                }

                results.push(SearchResult {
                    book: book.name.clone(),
                    chapter: chapter.number,
                    verse: verse.number,
                    text: verse.text.clone(),
                });

                if results.len() == RESULT_CAP {
                    break 'books;
                }
            }
        }
    }

    tracing::debug!(
        term = %term,
        exact_match,
        whole_words,
        result_count = results.len(),
        "search complete"
    );

    results
}

fn strip_annotations(text: &str) -> String {
    text.replace(['[', ']'], "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::corpus::{Book, Chapter, Verse};

    fn single_verse_corpus(text: &str) -> Corpus {
        Corpus {
            translation_id: "KJV".to_string(),
            books: vec![Book {
                name: "Genesis".to_string(),
                testament: Default::default(),
                chapters: vec![Chapter {
                    number: 1,
                    verses: vec![Verse {
                        number: 1,
                        text: text.to_string(),
                    }],
                }],
            }],
        }
    }

    const CREATION: &str = "In [the] beginning God created";

    #[test]
    fn empty_and_whitespace_queries_short_circuit() {
        let corpus = single_verse_corpus(CREATION);
        for &(exact, whole) in &[(false, false), (true, false), (false, true), (true, true)] {
            assert!(search(&corpus, "", exact, whole).is_empty());
            assert!(search(&corpus, "   ", exact, whole).is_empty());
        }
    }

    #[test]
    fn bracket_only_query_matches_in_substring_mode() {
        // "[]" survives the raw-term check and strips to an empty term,
        // which every verse contains.
        let corpus = single_verse_corpus(CREATION);
        assert_eq!(search(&corpus, "[]", false, false).len(), 1);
    }

    #[test]
    fn substring_mode_ignores_annotation_brackets() {
        let corpus = single_verse_corpus(CREATION);
        let results = search(&corpus, "the begin", false, false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].book, "Genesis");
        assert_eq!(results[0].chapter, 1);
        assert_eq!(results[0].verse, 1);
        // Display text keeps the original annotations.
        assert_eq!(results[0].text, CREATION);
    }

    #[test]
    fn whole_word_mode_rejects_prefixes() {
        let corpus = single_verse_corpus(CREATION);
        assert_eq!(search(&corpus, "the", true, true).len(), 1);
        assert!(search(&corpus, "begin", true, true).is_empty());
        assert_eq!(search(&corpus, "beginning", true, true).len(), 1);
    }

    #[test]
    fn partial_word_mode_matches_within_words() {
        let corpus = single_verse_corpus(CREATION);
        assert_eq!(search(&corpus, "egin", false, true).len(), 1);
        // No single word contains the space-separated phrase.
        assert!(search(&corpus, "the begin", false, true).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let corpus = single_verse_corpus(CREATION);
        assert_eq!(search(&corpus, "GOD", true, false).len(), 1);
        assert_eq!(search(&corpus, "God", true, true).len(), 1);
    }

    #[test]
    fn regex_metacharacters_in_query_are_literal() {
        let corpus = single_verse_corpus("Praise him (Selah)");
        assert_eq!(search(&corpus, "(selah)", true, true).len(), 1);
        assert!(search(&corpus, "(never)", true, true).is_empty());
    }

    #[test]
    fn results_are_capped_in_document_order() {
        let chapters = (1..=5)
            .map(|number| Chapter {
                number,
                verses: (1..=100)
                    .map(|v| Verse {
                        number: v,
                        text: "the word".to_string(),
                    })
                    .collect(),
            })
            .collect();
        let corpus = Corpus {
            translation_id: "KJV".to_string(),
            books: vec![Book {
                name: "Psalms".to_string(),
                testament: Default::default(),
                chapters,
            }],
        };

        let results = search(&corpus, "word", false, false);
        assert_eq!(results.len(), RESULT_CAP);
        assert_eq!((results[0].chapter, results[0].verse), (1, 1));
        assert_eq!((results[199].chapter, results[199].verse), (2, 100));
    }

    #[test]
    fn traversal_follows_book_then_chapter_order() {
        let corpus = Corpus {
            translation_id: "KJV".to_string(),
            books: vec![
                Book {
                    name: "Genesis".to_string(),
                    testament: Default::default(),
                    chapters: vec![
                        Chapter {
                            number: 1,
                            verses: vec![Verse { number: 1, text: "light".to_string() }],
                        },
                        Chapter {
                            number: 2,
                            verses: vec![Verse { number: 1, text: "light again".to_string() }],
                        },
                    ],
                },
                Book {
                    name: "Exodus".to_string(),
                    testament: Default::default(),
                    chapters: vec![Chapter {
                        number: 1,
                        verses: vec![Verse { number: 1, text: "light of Egypt".to_string() }],
                    }],
                },
            ],
        };

        let results = search(&corpus, "light", false, false);
        let coordinates: Vec<(&str, u32)> = results
            .iter()
            .map(|r| (r.book.as_str(), r.chapter))
            .collect();
        assert_eq!(
            coordinates,
            vec![("Genesis", 1), ("Genesis", 2), ("Exodus", 1)]
        );
    }
}
