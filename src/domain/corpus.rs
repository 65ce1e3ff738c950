//! Corpus data model for scripture translations.
//!
//! This module defines the hierarchical records a loaded translation is made
//! of (books containing chapters containing verses) and the parsing of raw
//! corpus documents into that shape. These types are immutable once loaded;
//! all lookup accessors degrade to empty results rather than failing when a
//! book or chapter is absent.

use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, ScripturaError};

/// Which testament a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    /// Old testament.
    #[default]
    Old,
    /// New testament.
    New,
}

/// A single verse: its 1-based number and display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// 1-based verse number within its chapter.
    #[serde(rename = "verse")]
    pub number: u32,

    /// Verse text, including any translator annotations in square brackets.
    pub text: String,
}

/// A chapter: its 1-based number and ordered verses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based chapter number within its book.
    #[serde(rename = "chapter")]
    pub number: u32,

    /// Verses in ascending number order.
    pub verses: Vec<Verse>,
}

impl Chapter {
    /// Returns the verse with the given number, if present.
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses.iter().find(|v| v.number == number)
    }

    /// Number of verses in this chapter.
    #[must_use]
    pub fn verse_count(&self) -> u32 {
        self.verses.len() as u32
    }
}

/// A book: unique name, testament, and ordered chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book name, unique within a translation.
    pub name: String,

    /// Testament the book belongs to. Defaults to old when the source
    /// document omits it.
    #[serde(default)]
    pub testament: Testament,

    /// Chapters in ascending number order, expected contiguous from 1.
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Returns the chapter with the given number, if present.
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }

    /// Number of chapters in this book.
    #[must_use]
    pub fn chapter_count(&self) -> u32 {
        self.chapters.len() as u32
    }
}

/// Raw document shape produced by a corpus source.
#[derive(Debug, Deserialize)]
struct CorpusDocument {
    books: Vec<Book>,
}

/// One translation's full book/chapter/verse tree.
///
/// A corpus is created once per translation on first successful load and
/// never mutated or evicted for the process lifetime. Lookups by name or
/// number return `Option`/empty rather than panicking so that a malformed
/// corpus surfaces as empty navigation results.
///
/// # Examples
///
/// ```
/// use scriptura::domain::Corpus;
///
/// let json = r#"{ "books": [ { "name": "Genesis", "testament": "old", "chapters": [
///     { "chapter": 1, "verses": [ { "verse": 1, "text": "In the beginning" } ] }
/// ] } ] }"#;
/// let corpus = Corpus::from_json("KJV", json).unwrap();
/// assert_eq!(corpus.chapter_count("Genesis"), 1);
/// assert_eq!(corpus.verse_count("Genesis", 1), 1);
/// assert!(corpus.book("Exodus").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    /// Identifier of the translation this corpus belongs to.
    pub translation_id: String,

    /// Books in canonical document order.
    pub books: Vec<Book>,
}

impl Corpus {
    /// Parses a raw corpus document into a corpus for the given translation.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::Parse`] when the document does not match the
    /// expected book/chapter/verse shape.
    pub fn from_json(translation_id: impl Into<String>, raw: &str) -> Result<Self> {
        let document: CorpusDocument = serde_json::from_str(raw)
            .map_err(|e| ScripturaError::Parse(format!("failed to parse corpus document: {e}")))?;
        Ok(Self {
            translation_id: translation_id.into(),
            books: document.books,
        })
    }

    /// Returns the book with the given name, if present.
    pub fn book(&self, name: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.name == name)
    }

    /// Number of chapters in the named book, or 0 when the book is absent.
    #[must_use]
    pub fn chapter_count(&self, book: &str) -> u32 {
        self.book(book).map_or(0, Book::chapter_count)
    }

    /// Number of verses in the given chapter, or 0 when book or chapter is absent.
    #[must_use]
    pub fn verse_count(&self, book: &str, chapter: u32) -> u32 {
        self.book(book)
            .and_then(|b| b.chapter(chapter))
            .map_or(0, Chapter::verse_count)
    }

    /// Verses of the given chapter, empty when book or chapter is absent.
    #[must_use]
    pub fn verses(&self, book: &str, chapter: u32) -> &[Verse] {
        self.book(book)
            .and_then(|b| b.chapter(chapter))
            .map_or(&[], |c| c.verses.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Corpus {
        let json = r#"{ "books": [
            { "name": "Genesis", "testament": "old", "chapters": [
                { "chapter": 1, "verses": [
                    { "verse": 1, "text": "In the beginning" },
                    { "verse": 2, "text": "And the earth" }
                ] },
                { "chapter": 2, "verses": [
                    { "verse": 1, "text": "Thus the heavens" }
                ] }
            ] },
            { "name": "Matthew", "testament": "new", "chapters": [
                { "chapter": 1, "verses": [
                    { "verse": 1, "text": "The book of the generation" }
                ] }
            ] }
        ] }"#;
        Corpus::from_json("KJV", json).unwrap()
    }

    #[test]
    fn parses_document_shape() {
        let corpus = sample();
        assert_eq!(corpus.translation_id, "KJV");
        assert_eq!(corpus.books.len(), 2);
        assert_eq!(corpus.books[0].testament, Testament::Old);
        assert_eq!(corpus.books[1].testament, Testament::New);
    }

    #[test]
    fn counts_and_lookups() {
        let corpus = sample();
        assert_eq!(corpus.chapter_count("Genesis"), 2);
        assert_eq!(corpus.verse_count("Genesis", 1), 2);
        assert_eq!(corpus.book("Genesis").unwrap().chapter(2).unwrap().verse_count(), 1);
        assert_eq!(
            corpus.book("Genesis").unwrap().chapter(1).unwrap().verse(2).unwrap().text,
            "And the earth"
        );
    }

    #[test]
    fn missing_entries_degrade_to_empty() {
        let corpus = sample();
        assert!(corpus.book("Exodus").is_none());
        assert_eq!(corpus.chapter_count("Exodus"), 0);
        assert_eq!(corpus.verse_count("Genesis", 9), 0);
        assert!(corpus.verses("Genesis", 9).is_empty());
        assert!(corpus.verses("Exodus", 1).is_empty());
    }

    #[test]
    fn testament_defaults_to_old_when_omitted() {
        let json = r#"{ "books": [ { "name": "Ruth", "chapters": [] } ] }"#;
        let corpus = Corpus::from_json("KJV", json).unwrap();
        assert_eq!(corpus.books[0].testament, Testament::Old);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = Corpus::from_json("KJV", "{ not json").unwrap_err();
        assert!(matches!(err, ScripturaError::Parse(_)));
    }
}
