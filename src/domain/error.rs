//! Error types for the scripture subsystem.
//!
//! This module defines the centralized error type [`ScripturaError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for scripture subsystem operations.
///
/// This enum consolidates all error conditions that can occur while loading
/// translations, reading or writing persisted state, and parsing configuration.
/// Most variants carry a plain description string; I/O errors convert
/// automatically using `#[from]`.
///
/// # Examples
///
/// ```
/// use scriptura::domain::ScripturaError;
///
/// fn validate_catalog() -> Result<(), ScripturaError> {
///     Err(ScripturaError::Config("missing translation id".to_string()))
/// }
///
/// fn read_store() -> Result<(), ScripturaError> {
///     Err(ScripturaError::Storage("failed to read file".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum ScripturaError {
    /// A translation could not be fetched or parsed.
    ///
    /// Carries the translation identifier the load was for and a description
    /// of the underlying failure. A failed load leaves the translation
    /// eligible for retry.
    #[error("Load error for translation '{translation_id}': {cause}")]
    Load {
        /// Identifier of the translation whose load failed.
        translation_id: String,
        /// Description of the fetch or parse failure.
        cause: String,
    },

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key/value backend fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A corpus document could not be parsed into the book/chapter/verse shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the translation catalog is malformed or required values
    /// are missing. The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A translation identifier is not present in the catalog.
    #[error("Unknown translation: {0}")]
    UnknownTranslation(String),
}

/// A specialized `Result` type for scripture subsystem operations.
///
/// This is a type alias for `std::result::Result<T, ScripturaError>` that simplifies
/// function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use scriptura::domain::Result;
///
/// fn restore_session() -> Result<()> {
///     // Function that may return ScripturaError
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScripturaError>;
