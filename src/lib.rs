//! Scriptura: scripture navigation, translation caching, and verse search.
//!
//! Scriptura is the embeddable core of a scripture presentation tool. It
//! provides:
//! - Book/chapter/verse navigation with validation against loaded content
//! - An in-memory cache of parsed translations, loaded at most once each
//! - Visit history and bookmarks, persisted through a host key/value store
//! - Full-text verse search with exact-match and whole-word modes
//! - Session restore so an app reopens where it was closed
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host Application (UI, IPC, scheduling)             │  ← Not this crate
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session Layer (session/)                           │  ← ScriptureSession
//! │  - Navigation state machine                         │  ← Business logic
//! │  - History and bookmarks                            │
//! │  - Persistence orchestration                        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Library Layer │   │ Search Layer  │   │ Storage Layer │
//! │ (library/)    │   │ (search/)     │   │ (storage/)    │
//! │ - Load states │   │ - Term modes  │   │ - JSON file   │
//! │ - Fetch jobs  │   │ - Result cap  │   │ - In-memory   │
//! │ - Corpus cache│   │ - Annotations │   │ - Backend API │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Corpus model (books, chapters, verses)           │
//! │  - Reference parsing and formatting                 │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`session`]: session facade tying navigation, history, and persistence
//! - [`library`]: translation load states, fetch jobs, and the corpus cache
//! - [`search`]: verse search across the active corpus
//! - [`domain`]: corpus model, references, errors
//! - [`storage`]: key/value persistence backends
//! - [`observability`]: tracing subscriber setup for binaries and tests
//!
//! # Configuration
//!
//! The translation catalog is static per deployment. It can be built in code
//! via [`Catalog::default_set`] or loaded from a TOML file:
//!
//! ```toml
//! # translations.toml
//! [[translation]]
//! id = "KJV"
//! display_name = "King James Version"
//! source_locator = "KJV.json"
//!
//! [[translation]]
//! id = "TWI"
//! display_name = "Twi"
//! source_locator = "TWI.json"
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Startup** (host):
//!    - Build or load the [`Catalog`]
//!    - Open a [`storage::KeyValueStore`] (typically [`storage::JsonFileStore`])
//!    - Call [`initialize`] to restore the previous session
//!
//! 2. **Active translation**:
//!    - Ensure the active translation's corpus is loaded, synchronously via
//!      [`ScriptureSession::ensure_loaded`] or by running the fetch job from
//!      [`ScriptureSession::set_translation`] on a background thread
//!
//! 3. **Preloading**:
//!    - Drain [`ScriptureSession::preload_jobs`] in the background so
//!      translations from past sessions are ready before they are selected
//!
//! 4. **Steady state**:
//!    - Route UI events to session operations; every durable change is
//!      mirrored to the store as it happens, so there is no save step
//!
//! # Examples
//!
//! ## Navigation
//!
//! ```rust
//! use scriptura::storage::MemoryStore;
//! use scriptura::{initialize, Catalog};
//!
//! let mut session = initialize(Catalog::default_set(), Box::new(MemoryStore::new()));
//!
//! session.set_book("John");
//! session.set_verse(Some(16));
//!
//! let reference = session.navigation().current_reference();
//! assert_eq!(reference.canonical(), "John 1:16");
//! ```
//!
//! ## Startup with file-backed state
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use scriptura::library::{CorpusFetcher, FileFetcher};
//! use scriptura::storage::JsonFileStore;
//! use scriptura::{initialize, Catalog};
//!
//! fn run() -> scriptura::Result<()> {
//!     let catalog = Catalog::from_file("config/translations.toml")?;
//!     let store = JsonFileStore::new(PathBuf::from("state/session.json"))?;
//!     let mut session = initialize(catalog, Box::new(store));
//!
//!     let fetcher = FileFetcher::new("corpora");
//!     let active = session.navigation().translation_id.clone();
//!     session.ensure_loaded(&active, &fetcher)?;
//!
//!     for job in session.preload_jobs() {
//!         let outcome = fetcher.fetch(&job.source_locator);
//!         let _ = session.complete_load(&job.translation_id, outcome);
//!     }
//!
//!     println!("{} matches", session.search("light", false, true).len());
//!     Ok(())
//! }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Host-Driven Fetching
//!
//! The crate never spawns threads or performs hidden I/O. Loading a
//! translation yields a [`FetchJob`] describing what to fetch; the host runs
//! it wherever it likes and reports the outcome back. The load state machine
//! still guarantees each translation is fetched at most once.
//!
//! ## Best-Effort Persistence
//!
//! Durable state is written through the key/value store as a side effect of
//! each mutation. A failing write is logged and the in-memory state stands,
//! so a read-only disk degrades the experience instead of breaking it.
//!
//! ## Verse-Exact History
//!
//! History entries always carry a verse, with verse 1 substituted when none
//! is selected. Book and chapter switches record the position being left;
//! direct jumps record the destination.

#![allow(clippy::multiple_crate_versions)]

pub mod domain;
pub mod library;
pub mod observability;
pub mod search;
pub mod session;
pub mod storage;

pub use domain::{Corpus, Reference, Result, ScripturaError};
pub use library::{FetchJob, LoadStatus};
pub use search::SearchResult;
pub use session::ScriptureSession;
pub use storage::KeyValueStore;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One installable translation known to the deployment.
///
/// Entries describe where a translation's corpus document lives; they say
/// nothing about whether it is loaded. The `source_locator` is opaque to this
/// crate and only interpreted by the host's [`library::CorpusFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Stable identifier, e.g. `"KJV"`. Used in persistence and lookups.
    pub id: String,

    /// Human-readable name for pickers, e.g. `"King James Version"`.
    pub display_name: String,

    /// Where the corpus document can be fetched from. Typically a file name
    /// relative to the host's corpus directory.
    pub source_locator: String,
}

impl TranslationEntry {
    /// Creates a catalog entry.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        source_locator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            source_locator: source_locator.into(),
        }
    }
}

/// The static set of translations a deployment ships with.
///
/// Catalogs are never empty and ids are unique; both are enforced at
/// construction. The first entry doubles as the default translation when
/// nothing valid has been persisted.
///
/// # Example
///
/// ```rust
/// use scriptura::{Catalog, TranslationEntry};
///
/// let catalog = Catalog::new(vec![
///     TranslationEntry::new("KJV", "King James Version", "KJV.json"),
///     TranslationEntry::new("FRENCH", "French", "FRENCH.json"),
/// ])
/// .unwrap();
///
/// assert!(catalog.contains("FRENCH"));
/// assert_eq!(catalog.default_entry().id, "KJV");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "translation")]
    entries: Vec<TranslationEntry>,
}

impl Catalog {
    /// Builds a catalog from entries.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::Config`] when `entries` is empty or two
    /// entries share an id.
    pub fn new(entries: Vec<TranslationEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ScripturaError::Config(
                "translation catalog is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(ScripturaError::Config(format!(
                    "duplicate translation id '{}'",
                    entry.id
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The built-in catalog: KJV, Twi, Ewe, and French, with `<id>.json`
    /// locators.
    #[must_use]
    pub fn default_set() -> Self {
        Self {
            entries: vec![
                TranslationEntry::new("KJV", "King James Version", "KJV.json"),
                TranslationEntry::new("TWI", "Twi", "TWI.json"),
                TranslationEntry::new("EWE", "Ewe", "EWE.json"),
                TranslationEntry::new("FRENCH", "French", "FRENCH.json"),
            ],
        }
    }

    /// Parses a catalog from TOML text using `[[translation]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::Config`] on syntax errors and on the same
    /// validation failures as [`Catalog::new`].
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let parsed: Self =
            toml::from_str(raw).map_err(|e| ScripturaError::Config(e.to_string()))?;
        Self::new(parsed.entries)
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Catalog::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    /// Looks an entry up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TranslationEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Whether the catalog has an entry with this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The fallback translation, which is the catalog's first entry.
    #[must_use]
    pub fn default_entry(&self) -> &TranslationEntry {
        &self.entries[0]
    }
}

/// Restores a session from persisted state.
///
/// Creates a [`ScriptureSession`] positioned where the previous session
/// ended, or at the defaults (first catalog entry, Genesis 1) on first run.
/// Nothing is fetched here; see [`ScriptureSession::preload_jobs`] for
/// warming the corpus cache.
///
/// # Example
///
/// ```rust
/// use scriptura::storage::MemoryStore;
/// use scriptura::{initialize, Catalog};
///
/// let session = initialize(Catalog::default_set(), Box::new(MemoryStore::new()));
/// assert_eq!(session.navigation().translation_id, "KJV");
/// ```
#[must_use]
pub fn initialize(catalog: Catalog, store: Box<dyn KeyValueStore>) -> ScriptureSession {
    tracing::debug!(translations = catalog.entries().len(), "initializing scripture session");
    ScriptureSession::restore(catalog, store)
}
