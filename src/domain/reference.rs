//! Reference addressing for corpus positions.
//!
//! A [`Reference`] addresses a book, chapter, and optional verse. Its
//! canonical string form `"<book> <chapter>[:<verse>]"` is the comparable
//! representation used for bookmarks and history, and the form references are
//! persisted in. Book names may contain spaces; parsing treats the last
//! whitespace-separated token as the chapter/verse locator and everything
//! before it as the book name.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A book + chapter [+ verse] address into a corpus.
///
/// # Examples
///
/// ```
/// use scriptura::domain::Reference;
///
/// let reference = Reference::parse("Song of Solomon 2:4").unwrap();
/// assert_eq!(reference.book, "Song of Solomon");
/// assert_eq!(reference.chapter, 2);
/// assert_eq!(reference.verse, Some(4));
/// assert_eq!(reference.canonical(), "Song of Solomon 2:4");
///
/// let chapter_only = Reference::new("Psalms", 23, None);
/// assert_eq!(chapter_only.canonical(), "Psalms 23");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Book name, possibly multi-word.
    pub book: String,

    /// 1-based chapter number.
    pub chapter: u32,

    /// 1-based verse number, `None` for a whole-chapter reference.
    pub verse: Option<u32>,
}

impl Reference {
    /// Creates a reference from its parts.
    pub fn new(book: impl Into<String>, chapter: u32, verse: Option<u32>) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }

    /// Parses a canonical reference string.
    ///
    /// Returns `None` for strings that do not follow the
    /// `"<book> <chapter>[:<verse>]"` shape instead of raising an error.
    pub fn parse(s: &str) -> Option<Self> {
        let (book, locator) = s.trim().rsplit_once(' ')?;
        let book = book.trim_end();
        if book.is_empty() {
            return None;
        }
        let (chapter, verse) = match locator.split_once(':') {
            Some((chapter, verse)) => (chapter.parse().ok()?, Some(verse.parse().ok()?)),
            None => (locator.parse().ok()?, None),
        };
        Some(Self {
            book: book.to_string(),
            chapter,
            verse,
        })
    }

    /// The canonical string form, `"<book> <chapter>[:<verse>]"`.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verse {
            Some(verse) => write!(f, "{} {}:{}", self.book, self.chapter, verse),
            None => write!(f, "{} {}", self.book, self.chapter),
        }
    }
}

// References persist as their canonical string, matching the stored
// bookmark/history payload shape.
impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid reference: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_with_verse() {
        let reference = Reference::new("Genesis", 1, Some(3));
        assert_eq!(Reference::parse(&reference.canonical()), Some(reference));
    }

    #[test]
    fn round_trips_without_verse() {
        let reference = Reference::new("Genesis", 12, None);
        assert_eq!(reference.canonical(), "Genesis 12");
        assert_eq!(Reference::parse(&reference.canonical()), Some(reference));
    }

    #[test]
    fn round_trips_multi_word_book() {
        let reference = Reference::new("Song of Solomon", 2, Some(4));
        assert_eq!(Reference::parse(&reference.canonical()), Some(reference));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(Reference::parse(""), None);
        assert_eq!(Reference::parse("Genesis"), None);
        assert_eq!(Reference::parse("Genesis one"), None);
        assert_eq!(Reference::parse("Genesis 1:"), None);
        assert_eq!(Reference::parse(" 3:16"), None);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let reference = Reference::new("John", 3, Some(16));
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, "\"John 3:16\"");
        let parsed: Reference = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reference);
    }

    #[test]
    fn deserialize_rejects_malformed_reference() {
        let result: std::result::Result<Reference, _> = serde_json::from_str("\"Genesis\"");
        assert!(result.is_err());
    }
}
