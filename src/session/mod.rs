//! Session layer coordinating navigation, history, bookmarks, and persistence.
//!
//! This module defines [`ScriptureSession`], the owned context object hosts
//! create once per process. It wires the reading position to the corpus
//! cache, records visits and bookmarks, and mirrors every durable piece of
//! state into the host's key/value store as a best-effort side effect.
//!
//! # Architecture
//!
//! The session follows a unidirectional flow:
//!
//! ```text
//! UI events → session operations → navigation/history/bookmark mutations
//!                  │                        │
//!                  ▼                        ▼
//!         corpus cache reads       key/value persistence
//!      (loader ensures presence)     (failures logged, never raised)
//! ```
//!
//! # Modules
//!
//! - [`navigation`]: the reading-position state machine
//! - [`history`]: capped visit log
//! - [`bookmarks`]: deduplicated saved references
//!
//! # Example
//!
//! ```
//! use scriptura::storage::MemoryStore;
//! use scriptura::{initialize, Catalog};
//!
//! let mut session = initialize(Catalog::default_set(), Box::new(MemoryStore::new()));
//! session.set_book("Exodus");
//! assert_eq!(session.navigation().book, "Exodus");
//! assert_eq!(session.history().len(), 1);
//! ```

pub mod bookmarks;
pub mod history;
pub mod navigation;

pub use bookmarks::BookmarkSet;
pub use history::{HistoryEntry, HistoryLog, HISTORY_CAP};
pub use navigation::NavigationState;

use crate::domain::corpus::{Book, Corpus, Verse};
use crate::domain::error::{Result, ScripturaError};
use crate::domain::reference::Reference;
use crate::library::fetch::{CorpusFetcher, FetchJob};
use crate::library::loader::{LoadEvent, LoadStatus, TranslationLoader};
use crate::library::repository::CorpusRepository;
use crate::search::SearchResult;
use crate::storage::backend::KeyValueStore;
use crate::storage::keys;
use crate::{Catalog, TranslationEntry};

/// Book shown when nothing has been persisted yet.
const DEFAULT_BOOK: &str = "Genesis";

/// Chapter shown when nothing has been persisted yet.
const DEFAULT_CHAPTER: u32 = 1;

/// Owned context for one reading session.
///
/// Holds the corpus cache, the per-translation load state, the current
/// position, the visit history, and the bookmark set, together with the
/// key/value store they persist through. Constructed from persisted values
/// via [`restore`](ScriptureSession::restore); there are no ambient
/// singletons, so tests build isolated instances freely.
///
/// Persistence is best-effort throughout: a failing store write is logged
/// and the in-memory mutation stands.
pub struct ScriptureSession {
    /// Static translation catalog supplied at startup.
    catalog: Catalog,

    /// Parsed corpora, one per successfully loaded translation.
    repository: CorpusRepository,

    /// Load state machine guarding duplicate fetches.
    loader: TranslationLoader,

    /// Current reading position.
    navigation: NavigationState,

    /// Recent visits, most recent first.
    history: HistoryLog,

    /// Saved references.
    bookmarks: BookmarkSet,

    /// Translation ids that have completed a load, past sessions included.
    /// Drives background preloading at startup.
    loaded_ids: Vec<String>,

    /// Host persistence backend.
    store: Box<dyn KeyValueStore>,
}

impl ScriptureSession {
    /// Builds a session from persisted values, falling back to defaults.
    ///
    /// The stored translation id must be present in the catalog, otherwise
    /// the catalog's first entry is used. A missing or malformed book,
    /// chapter, history, or bookmark value falls back to its default, with
    /// the fallback logged. Nothing is fetched here; corpora load on demand.
    pub fn restore(catalog: Catalog, store: Box<dyn KeyValueStore>) -> Self {
        let translation_id = match store.get(keys::TRANSLATION) {
            Some(stored) if catalog.contains(&stored) => stored,
            Some(stored) => {
                tracing::warn!(stored = %stored, "stored translation not in catalog, using default");
                catalog.default_entry().id.clone()
            }
            None => catalog.default_entry().id.clone(),
        };

        let book = store
            .get(keys::CURRENT_BOOK)
            .unwrap_or_else(|| DEFAULT_BOOK.to_string());

        let chapter = store
            .get(keys::CURRENT_CHAPTER)
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|&chapter| chapter >= 1)
            .unwrap_or(DEFAULT_CHAPTER);

        let history: HistoryLog = restore_json(store.as_ref(), keys::HISTORY);
        let bookmarks: BookmarkSet = restore_json(store.as_ref(), keys::BOOKMARKS);
        let loaded_ids: Vec<String> = restore_json(store.as_ref(), keys::LOADED_TRANSLATIONS);

        tracing::debug!(
            translation_id = %translation_id,
            book = %book,
            chapter,
            history_len = history.len(),
            bookmark_count = bookmarks.len(),
            "session restored"
        );

        Self {
            catalog,
            repository: CorpusRepository::new(),
            loader: TranslationLoader::new(),
            navigation: NavigationState::new(translation_id, book, chapter),
            history,
            bookmarks,
            loaded_ids,
            store,
        }
    }

    /// The catalog this session was built with.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current reading position.
    #[must_use]
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Visit history, most recent first.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Saved references.
    #[must_use]
    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    // ---- loading ----------------------------------------------------------

    /// Load status of a translation.
    #[must_use]
    pub fn load_status(&self, translation_id: &str) -> LoadStatus {
        self.loader.status(translation_id)
    }

    /// Installs the observer notified of load completions and failures.
    pub fn on_load_event(&mut self, observer: impl FnMut(&LoadEvent) + Send + 'static) {
        self.loader.set_observer(observer);
    }

    /// Loads a translation synchronously through the given fetcher.
    ///
    /// Repeated calls for the same translation fetch at most once; a
    /// previously failed translation is retried.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::UnknownTranslation`] for an id outside the
    /// catalog and [`ScripturaError::Load`] when the fetch or parse fails.
    pub fn ensure_loaded(
        &mut self,
        translation_id: &str,
        fetcher: &dyn CorpusFetcher,
    ) -> Result<LoadStatus> {
        let entry = self.catalog_entry(translation_id)?.clone();
        let status = self
            .loader
            .ensure_loaded(&mut self.repository, &entry, fetcher)?;
        if status == LoadStatus::Loaded {
            self.record_loaded(translation_id);
        }
        Ok(status)
    }

    /// Requests a background load, yielding a job only when a fetch must run.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::UnknownTranslation`] for an id outside the
    /// catalog.
    pub fn begin_load(&mut self, translation_id: &str) -> Result<Option<FetchJob>> {
        let entry = self.catalog_entry(translation_id)?.clone();
        Ok(self.loader.begin(&self.repository, &entry))
    }

    /// Reports the outcome of a fetch job issued by [`begin_load`] or
    /// [`set_translation`].
    ///
    /// Background callers may ignore the returned error; the failure is
    /// recorded against the translation, delivered to the load observer, and
    /// never affects other translations.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::Load`] when the outcome was a failure or the
    /// document did not parse.
    ///
    /// [`begin_load`]: ScriptureSession::begin_load
    /// [`set_translation`]: ScriptureSession::set_translation
    pub fn complete_load(
        &mut self,
        translation_id: &str,
        outcome: Result<String>,
    ) -> Result<LoadStatus> {
        let status = self
            .loader
            .complete(&mut self.repository, translation_id, outcome)?;
        self.record_loaded(translation_id);
        Ok(status)
    }

    /// Fetch jobs for translations that loaded in past sessions.
    ///
    /// Intended to run fire-and-forget at startup. Translations already
    /// loaded or in flight yield no job, so ensuring the active translation
    /// first never double-fetches it.
    pub fn preload_jobs(&mut self) -> Vec<FetchJob> {
        let ids = self.loaded_ids.clone();
        ids.iter()
            .filter_map(|id| {
                let entry = self.catalog.get(id)?.clone();
                self.loader.begin(&self.repository, &entry)
            })
            .collect()
    }

    fn catalog_entry(&self, translation_id: &str) -> Result<&TranslationEntry> {
        self.catalog
            .get(translation_id)
            .ok_or_else(|| ScripturaError::UnknownTranslation(translation_id.to_string()))
    }

    fn record_loaded(&mut self, translation_id: &str) {
        if self.loaded_ids.iter().any(|id| id == translation_id) {
            return;
        }
        self.loaded_ids.push(translation_id.to_string());
        persist_json(self.store.as_mut(), keys::LOADED_TRANSLATIONS, &self.loaded_ids);
    }

    // ---- navigation -------------------------------------------------------

    /// Selects the active translation, yielding a fetch job when its corpus
    /// still has to load.
    ///
    /// Book and chapter are kept as they are; a book the new translation
    /// lacks shows as empty content rather than being auto-corrected.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::UnknownTranslation`] for an id outside the
    /// catalog.
    pub fn set_translation(&mut self, translation_id: &str) -> Result<Option<FetchJob>> {
        let entry = self.catalog_entry(translation_id)?.clone();
        self.navigation.translation_id = entry.id.clone();
        persist(self.store.as_mut(), keys::TRANSLATION, &entry.id);
        tracing::debug!(translation_id = %entry.id, "translation selected");
        Ok(self.loader.begin(&self.repository, &entry))
    }

    /// Switches book, recording the position being left.
    pub fn set_book(&mut self, name: &str) {
        self.navigation.set_book(&mut self.history, name);
        self.persist_position_and_history();
    }

    /// Switches chapter; out-of-range requests are silent no-ops.
    pub fn set_chapter(&mut self, chapter: u32) {
        let corpus = self.repository.get(&self.navigation.translation_id);
        if self.navigation.set_chapter(corpus, &mut self.history, chapter) {
            self.persist_position_and_history();
        }
    }

    /// Selects a verse without recording a visit.
    pub fn set_verse(&mut self, verse: Option<u32>) {
        self.navigation.set_verse(verse);
    }

    /// Jumps to a reference, recording the destination.
    pub fn navigate_to_reference(&mut self, reference: &Reference) {
        self.navigation.navigate_to(&mut self.history, reference);
        self.persist_position_and_history();
    }

    /// Moves to the next chapter, if there is one.
    pub fn next_chapter(&mut self) {
        let corpus = self.repository.get(&self.navigation.translation_id);
        if self.navigation.next_chapter(corpus, &mut self.history) {
            self.persist_position_and_history();
        }
    }

    /// Moves to the previous chapter, if there is one.
    pub fn previous_chapter(&mut self) {
        let corpus = self.repository.get(&self.navigation.translation_id);
        if self.navigation.previous_chapter(corpus, &mut self.history) {
            self.persist_position_and_history();
        }
    }

    /// Steps to the next verse, rolling into the next chapter at the end.
    pub fn next_verse(&mut self) {
        let before = self.navigation.chapter;
        let corpus = self.repository.get(&self.navigation.translation_id);
        self.navigation.next_verse(corpus, &mut self.history);
        if self.navigation.chapter != before {
            self.persist_position_and_history();
        }
    }

    /// Steps to the previous verse, falling back a chapter at the start.
    pub fn previous_verse(&mut self) {
        let before = self.navigation.chapter;
        let corpus = self.repository.get(&self.navigation.translation_id);
        self.navigation.previous_verse(corpus, &mut self.history);
        if self.navigation.chapter != before {
            self.persist_position_and_history();
        }
    }

    fn persist_position_and_history(&mut self) {
        persist(self.store.as_mut(), keys::CURRENT_BOOK, &self.navigation.book);
        let chapter = self.navigation.chapter.to_string();
        persist(self.store.as_mut(), keys::CURRENT_CHAPTER, &chapter);
        persist_json(self.store.as_mut(), keys::HISTORY, &self.history);
    }

    // ---- derived queries --------------------------------------------------

    /// The active translation's corpus, if loaded.
    #[must_use]
    pub fn active_corpus(&self) -> Option<&Corpus> {
        self.repository.get(&self.navigation.translation_id)
    }

    /// Books of the active corpus, empty until it loads.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        self.active_corpus().map_or(&[], |c| c.books.as_slice())
    }

    /// Verses of the current chapter, empty when corpus, book, or chapter is
    /// absent.
    #[must_use]
    pub fn current_verses(&self) -> &[Verse] {
        self.active_corpus().map_or(&[], |corpus| {
            corpus.verses(&self.navigation.book, self.navigation.chapter)
        })
    }

    /// Number of chapters in a book of the active corpus.
    #[must_use]
    pub fn chapter_count(&self, book: &str) -> u32 {
        self.active_corpus().map_or(0, |c| c.chapter_count(book))
    }

    /// Number of verses in a chapter of the active corpus.
    #[must_use]
    pub fn verse_count(&self, book: &str, chapter: u32) -> u32 {
        self.active_corpus().map_or(0, |c| c.verse_count(book, chapter))
    }

    /// Chapter numbers of the current book, empty when data is absent.
    #[must_use]
    pub fn available_chapters(&self) -> Vec<u32> {
        self.active_corpus()
            .and_then(|c| c.book(&self.navigation.book))
            .map_or_else(Vec::new, |b| b.chapters.iter().map(|c| c.number).collect())
    }

    /// Verse numbers of the current chapter, empty when data is absent.
    #[must_use]
    pub fn available_verses(&self) -> Vec<u32> {
        self.current_verses().iter().map(|v| v.number).collect()
    }

    /// Searches the active corpus; an unloaded corpus yields no results.
    #[must_use]
    pub fn search(&self, term: &str, exact_match: bool, whole_words: bool) -> Vec<SearchResult> {
        self.active_corpus().map_or_else(Vec::new, |corpus| {
            crate::search::search(corpus, term, exact_match, whole_words)
        })
    }

    // ---- bookmarks and history --------------------------------------------

    /// Saves a reference; re-adding an existing bookmark is a no-op.
    pub fn add_bookmark(&mut self, reference: Reference) {
        if self.bookmarks.add(reference) {
            persist_json(self.store.as_mut(), keys::BOOKMARKS, &self.bookmarks);
        }
    }

    /// Saves the current position, with verse 1 substituted when no verse is
    /// selected.
    pub fn bookmark_current(&mut self) {
        let reference = self.navigation.current_reference();
        self.add_bookmark(reference);
    }

    /// Removes a saved reference by exact match.
    pub fn remove_bookmark(&mut self, reference: &Reference) {
        if self.bookmarks.remove(reference) {
            persist_json(self.store.as_mut(), keys::BOOKMARKS, &self.bookmarks);
        }
    }

    /// Whether a reference is saved.
    #[must_use]
    pub fn is_bookmarked(&self, reference: &Reference) -> bool {
        self.bookmarks.contains(reference)
    }

    /// Records a visit explicitly.
    pub fn append_history(&mut self, reference: Reference) {
        self.history.append(reference);
        persist_json(self.store.as_mut(), keys::HISTORY, &self.history);
    }

    /// Empties the visit history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        persist_json(self.store.as_mut(), keys::HISTORY, &self.history);
    }
}

/// Best-effort write; a failure is logged and in-memory state stands.
fn persist(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(key = %key, error = %e, "persist failed, keeping in-memory state");
    }
}

fn persist_json<T: serde::Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => persist(store, key, &json),
        Err(e) => tracing::warn!(key = %key, error = %e, "serialize failed, skipping persist"),
    }
}

fn restore_json<T: serde::de::DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> T {
    match store.get(key) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %key, error = %e, "stored value unreadable, using default");
            T::default()
        }),
        None => T::default(),
    }
}
