//! Domain layer for the scripture subsystem.
//!
//! This module contains the core domain types for the crate, independent of
//! loading, session, or persistence concerns: the corpus tree a translation
//! parses into, the reference type that addresses positions within it, and
//! the crate-wide error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`corpus`]: Corpus, book, chapter, and verse records
//! - [`reference`]: Canonical reference addressing
//!
//! # Examples
//!
//! ```
//! use scriptura::domain::{Reference, Result};
//!
//! fn bookmark_target() -> Result<Reference> {
//!     Ok(Reference::new("John", 3, Some(16)))
//! }
//! ```

pub mod corpus;
pub mod error;
pub mod reference;

pub use corpus::{Book, Chapter, Corpus, Testament, Verse};
pub use error::{Result, ScripturaError};
pub use reference::Reference;
