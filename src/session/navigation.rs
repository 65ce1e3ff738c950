//! Reading-position state machine.
//!
//! [`NavigationState`] is the composite current position: translation, book,
//! chapter, and optional verse. Transitions follow the subsystem's visit
//! recording rules:
//!
//! - changing book or chapter records the reference being *left*
//! - navigating directly to a reference records the *destination*
//! - verse-only movement is passive scrolling and records nothing
//!
//! The asymmetry between origin and destination recording is intentional and
//! covered by tests. Out-of-range chapter requests are silent no-ops; the
//! surrounding UI only offers valid chapter numbers, and an unloaded corpus
//! simply rejects every chapter change. A recorded reference substitutes
//! verse 1 when no verse is selected.

use crate::domain::corpus::Corpus;
use crate::domain::reference::Reference;
use crate::session::history::HistoryLog;

/// Current reading position.
///
/// Mutated on every navigation action. `verse` is `None` when the reader is
/// on a whole chapter rather than a specific verse. The book is not required
/// to exist in the active corpus; lookups against a missing book degrade to
/// empty results rather than the state machine auto-correcting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Identifier of the active translation.
    pub translation_id: String,

    /// Current book name.
    pub book: String,

    /// Current 1-based chapter number.
    pub chapter: u32,

    /// Current verse number, `None` for whole-chapter reading.
    pub verse: Option<u32>,
}

impl NavigationState {
    /// Creates a position at the start of a book.
    pub fn new(translation_id: impl Into<String>, book: impl Into<String>, chapter: u32) -> Self {
        Self {
            translation_id: translation_id.into(),
            book: book.into(),
            chapter,
            verse: None,
        }
    }

    /// The position as a recordable reference, substituting verse 1 when no
    /// verse is selected.
    #[must_use]
    pub fn current_reference(&self) -> Reference {
        Reference::new(
            self.book.clone(),
            self.chapter,
            Some(self.verse.unwrap_or(1)),
        )
    }

    /// Switches book, recording the position being left.
    ///
    /// Resets to chapter 1 with no verse selected. The previous reference is
    /// appended to history unconditionally.
    pub fn set_book(&mut self, history: &mut HistoryLog, name: impl Into<String>) {
        history.append(self.current_reference());
        self.book = name.into();
        self.chapter = 1;
        self.verse = None;
        tracing::debug!(book = %self.book, "book changed");
    }

    /// Switches chapter, recording the position being left.
    ///
    /// Out-of-range chapters (including any chapter when the corpus is not
    /// loaded) are ignored. A valid request clears the verse selection;
    /// history is appended only when the chapter actually changes. Returns
    /// `true` when the request was applied.
    pub fn set_chapter(
        &mut self,
        corpus: Option<&Corpus>,
        history: &mut HistoryLog,
        chapter: u32,
    ) -> bool {
        let count = corpus.map_or(0, |c| c.chapter_count(&self.book));
        if chapter < 1 || chapter > count {
            tracing::debug!(chapter, chapter_count = count, "chapter out of range, ignoring");
            return false;
        }

        if chapter != self.chapter {
            history.append(self.current_reference());
        }
        self.chapter = chapter;
        self.verse = None;
        true
    }

    /// Selects a verse directly without recording a visit.
    ///
    /// Verse-only changes are passive scrolling. Callers supply in-range
    /// numbers; the value is not validated against the chapter's verse count.
    pub fn set_verse(&mut self, verse: Option<u32>) {
        self.verse = verse;
    }

    /// Jumps to a reference, recording the destination.
    ///
    /// Sets book, chapter, and verse in one step and appends exactly one
    /// history entry for where the jump landed, not where it started.
    pub fn navigate_to(&mut self, history: &mut HistoryLog, reference: &Reference) {
        self.book = reference.book.clone();
        self.chapter = reference.chapter;
        self.verse = reference.verse;
        history.append(self.current_reference());
        tracing::debug!(reference = %reference, "navigated to reference");
    }

    /// Moves to the next chapter, if there is one.
    pub fn next_chapter(&mut self, corpus: Option<&Corpus>, history: &mut HistoryLog) -> bool {
        self.set_chapter(corpus, history, self.chapter + 1)
    }

    /// Moves to the previous chapter, if there is one.
    pub fn previous_chapter(&mut self, corpus: Option<&Corpus>, history: &mut HistoryLog) -> bool {
        self.set_chapter(corpus, history, self.chapter.saturating_sub(1))
    }

    /// Steps to the next verse, rolling over to the next chapter's verse 1.
    ///
    /// A plain step within the chapter is passive; the rollover goes through
    /// [`set_chapter`](Self::set_chapter) and records the chapter change.
    /// No-op on the last verse of the last chapter.
    pub fn next_verse(&mut self, corpus: Option<&Corpus>, history: &mut HistoryLog) {
        let Some(corpus) = corpus else { return };
        let verse = self.verse.unwrap_or(1);

        if verse < corpus.verse_count(&self.book, self.chapter) {
            self.verse = Some(verse + 1);
        } else if self.set_chapter(Some(corpus), history, self.chapter + 1) {
            self.verse = Some(1);
        }
    }

    /// Steps to the previous verse, falling back to the previous chapter.
    ///
    /// Stepping before verse 1 lands on verse 1 of the previous chapter, not
    /// its last verse. No-op on the first verse of the first chapter.
    pub fn previous_verse(&mut self, corpus: Option<&Corpus>, history: &mut HistoryLog) {
        let Some(corpus) = corpus else { return };
        let verse = self.verse.unwrap_or(1);

        if verse > 1 {
            self.verse = Some(verse - 1);
        } else if self.set_chapter(Some(corpus), history, self.chapter.saturating_sub(1)) {
            self.verse = Some(1);
        }
    }
}
