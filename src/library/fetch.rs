//! Corpus source fetching.
//!
//! This module defines the [`CorpusFetcher`] trait that abstracts over how a
//! translation's raw document is obtained from its source locator, plus the
//! [`FetchJob`] unit of work the loader hands back when a fetch must actually
//! be issued. Transport details (filesystem, HTTP, bundled assets) are the
//! host's concern; the loader only requires "fetch succeeds with a parseable
//! payload" or "fetch fails with an error".

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;

/// A pending fetch for one translation.
///
/// Produced by [`TranslationLoader::begin`](crate::library::TranslationLoader::begin)
/// when no load is in flight and the corpus is not cached. The host runs the
/// fetch on whatever scheduler it owns and reports the outcome back through
/// `complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchJob {
    /// Identifier of the translation being fetched.
    pub translation_id: String,

    /// Opaque locator from the catalog entry, passed to the fetcher.
    pub source_locator: String,
}

/// Abstraction over corpus document retrieval.
///
/// # Implementations
///
/// - [`FileFetcher`]: resolves locators as paths under a base directory
///
/// Tests typically supply an in-memory implementation returning canned
/// documents.
pub trait CorpusFetcher: Send {
    /// Retrieves the raw corpus document behind `locator`.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be read. The loader records
    /// the failure against the translation and leaves it eligible for retry.
    fn fetch(&self, locator: &str) -> Result<String>;
}

/// Fetcher reading corpus documents from the filesystem.
///
/// Locators are joined onto a base directory, matching the layout where each
/// translation ships as one JSON document named after its identifier.
///
/// # Examples
///
/// ```no_run
/// use scriptura::library::{CorpusFetcher, FileFetcher};
///
/// let fetcher = FileFetcher::new("/usr/share/scriptura/bibles");
/// let raw = fetcher.fetch("KJV.json")?;
/// # Ok::<(), scriptura::ScripturaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base_dir: PathBuf,
}

impl FileFetcher {
    /// Creates a fetcher rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl CorpusFetcher for FileFetcher {
    fn fetch(&self, locator: &str) -> Result<String> {
        let path = self.base_dir.join(locator);
        tracing::debug!(path = ?path, "reading corpus document");
        Ok(std::fs::read_to_string(path)?)
    }
}
