//! Translation library: corpus cache and guarded loading.
//!
//! This module owns the path from a catalog entry to a cached, queryable
//! corpus. The [`CorpusRepository`] holds parsed corpora for the process
//! lifetime; the [`TranslationLoader`] decides when a fetch is actually
//! issued and records per-translation load state; [`CorpusFetcher`]
//! implementations supply the raw documents.
//!
//! # Modules
//!
//! - `repository`: in-memory translation id → corpus map
//! - `loader`: load state machine with the at-most-once fetch guard
//! - `fetch`: fetcher trait, fetch jobs, and the filesystem fetcher

pub mod fetch;
pub mod loader;
pub mod repository;

pub use fetch::{CorpusFetcher, FetchJob, FileFetcher};
pub use loader::{LoadEvent, LoadObserver, LoadStatus, TranslationLoader};
pub use repository::CorpusRepository;
