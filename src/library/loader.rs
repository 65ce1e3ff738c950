//! Guarded translation loading.
//!
//! This module implements the per-translation load state machine that sits
//! between navigation/search and the corpus sources. Its single
//! correctness-critical guarantee: at most one fetch per translation per
//! process lifetime, unless a previous fetch failed.
//!
//! # State machine
//!
//! ```text
//! not-requested ──begin──▶ loading ──complete(Ok)───▶ loaded
//!       ▲                     │
//!       │                     └─complete(Err)──▶ failed
//!       └───────────(failed is begin-eligible)─────┘
//! ```
//!
//! `begin` is the guard: it yields a [`FetchJob`] only when no load is in
//! flight and the corpus is not already cached. Hosts run the job on their
//! own scheduler and report back through `complete`; the synchronous
//! [`ensure_loaded`](TranslationLoader::ensure_loaded) drives both phases
//! through an injected [`CorpusFetcher`] for hosts that block on the active
//! translation. Background loads are best-effort: a failure marks that
//! translation `failed` and never propagates to other translations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::corpus::Corpus;
use crate::domain::error::{Result, ScripturaError};
use crate::library::fetch::{CorpusFetcher, FetchJob};
use crate::library::repository::CorpusRepository;
use crate::TranslationEntry;

/// Per-translation cache/fetch state.
///
/// `Loaded` implies the corpus is present in the repository. `Failed` leaves
/// the translation eligible for a fresh load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    /// No load has been requested yet.
    #[default]
    NotRequested,
    /// A fetch is in flight; further requests must not start another.
    Loading,
    /// The corpus is cached in the repository.
    Loaded,
    /// The last fetch or parse failed; a new request may retry.
    Failed,
}

/// Status transition notification delivered to the load observer.
///
/// Emitted on every transition out of `loading`, for both foreground and
/// background loads, so hosts can surface background failures without the
/// core being coupled to a concrete logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// A translation finished loading and its corpus is cached.
    Loaded {
        /// Identifier of the loaded translation.
        translation_id: String,
    },

    /// A translation fetch or parse failed.
    Failed {
        /// Identifier of the translation that failed.
        translation_id: String,
        /// Human-readable failure description.
        message: String,
    },
}

/// Observer callback invoked on load completion and failure.
pub type LoadObserver = Box<dyn FnMut(&LoadEvent) + Send>;

/// Fetch coordinator enforcing the at-most-once load guard.
///
/// # Examples
///
/// ```
/// use scriptura::domain::Result;
/// use scriptura::library::{CorpusFetcher, CorpusRepository, LoadStatus, TranslationLoader};
/// use scriptura::TranslationEntry;
///
/// struct Canned;
///
/// impl CorpusFetcher for Canned {
///     fn fetch(&self, _locator: &str) -> Result<String> {
///         Ok(r#"{ "books": [] }"#.to_string())
///     }
/// }
///
/// let mut repository = CorpusRepository::new();
/// let mut loader = TranslationLoader::new();
/// let entry = TranslationEntry::new("KJV", "King James Version", "KJV.json");
///
/// let status = loader.ensure_loaded(&mut repository, &entry, &Canned)?;
/// assert_eq!(status, LoadStatus::Loaded);
/// assert!(repository.contains("KJV"));
/// # Ok::<(), scriptura::ScripturaError>(())
/// ```
#[derive(Default)]
pub struct TranslationLoader {
    /// Load state per translation id; absent means not requested.
    statuses: HashMap<String, LoadStatus>,

    /// Optional observer for load completion/failure events.
    observer: Option<LoadObserver>,
}

impl TranslationLoader {
    /// Creates a loader with no loads requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the observer notified of every load completion or failure.
    ///
    /// Replaces any previously installed observer.
    pub fn set_observer(&mut self, observer: impl FnMut(&LoadEvent) + Send + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Current load status for a translation.
    #[must_use]
    pub fn status(&self, translation_id: &str) -> LoadStatus {
        self.statuses
            .get(translation_id)
            .copied()
            .unwrap_or_default()
    }

    /// Requests a load, yielding a fetch job only when one must be issued.
    ///
    /// Returns `None` when the corpus is already cached (marking the
    /// translation `loaded`) or when a fetch is already in flight. Otherwise
    /// marks the translation `loading` and hands back the job; the caller is
    /// then responsible for reporting the outcome via [`complete`].
    ///
    /// [`complete`]: TranslationLoader::complete
    pub fn begin(
        &mut self,
        repository: &CorpusRepository,
        entry: &TranslationEntry,
    ) -> Option<FetchJob> {
        if repository.contains(&entry.id) {
            self.statuses.insert(entry.id.clone(), LoadStatus::Loaded);
            return None;
        }

        if self.status(&entry.id) == LoadStatus::Loading {
            tracing::debug!(translation_id = %entry.id, "load already in flight");
            return None;
        }

        self.statuses.insert(entry.id.clone(), LoadStatus::Loading);
        tracing::debug!(
            translation_id = %entry.id,
            source = %entry.source_locator,
            "starting translation fetch"
        );

        Some(FetchJob {
            translation_id: entry.id.clone(),
            source_locator: entry.source_locator.clone(),
        })
    }

    /// Records the outcome of a fetch job.
    ///
    /// On success the document is parsed and cached, the translation becomes
    /// `loaded`, and the observer is notified. On fetch or parse failure the
    /// translation becomes `failed` (eligible for retry), the observer is
    /// notified, and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::Load`] when the outcome was an error or the
    /// document could not be parsed.
    pub fn complete(
        &mut self,
        repository: &mut CorpusRepository,
        translation_id: &str,
        outcome: Result<String>,
    ) -> Result<LoadStatus> {
        match outcome.and_then(|raw| Corpus::from_json(translation_id, &raw)) {
            Ok(corpus) => {
                repository.put(corpus);
                self.statuses
                    .insert(translation_id.to_string(), LoadStatus::Loaded);
                tracing::debug!(translation_id = %translation_id, "translation loaded");
                self.emit(&LoadEvent::Loaded {
                    translation_id: translation_id.to_string(),
                });
                Ok(LoadStatus::Loaded)
            }
            Err(e) => {
                let cause = e.to_string();
                self.statuses
                    .insert(translation_id.to_string(), LoadStatus::Failed);
                tracing::warn!(
                    translation_id = %translation_id,
                    error = %cause,
                    "translation load failed"
                );
                self.emit(&LoadEvent::Failed {
                    translation_id: translation_id.to_string(),
                    message: cause.clone(),
                });
                Err(ScripturaError::Load {
                    translation_id: translation_id.to_string(),
                    cause,
                })
            }
        }
    }

    /// Loads a translation synchronously through the given fetcher.
    ///
    /// Drives [`begin`](TranslationLoader::begin) and
    /// [`complete`](TranslationLoader::complete) in one call. Cache hits and
    /// in-flight loads return the current status without touching the
    /// fetcher, preserving the at-most-once guarantee.
    ///
    /// # Errors
    ///
    /// Returns [`ScripturaError::Load`] when the fetch or parse fails.
    pub fn ensure_loaded(
        &mut self,
        repository: &mut CorpusRepository,
        entry: &TranslationEntry,
        fetcher: &dyn CorpusFetcher,
    ) -> Result<LoadStatus> {
        let Some(job) = self.begin(repository, entry) else {
            return Ok(self.status(&entry.id));
        };

        let outcome = fetcher.fetch(&job.source_locator);
        self.complete(repository, &job.translation_id, outcome)
    }

    fn emit(&mut self, event: &LoadEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}
