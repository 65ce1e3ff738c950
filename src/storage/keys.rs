//! Well-known persistence keys.
//!
//! All session state lives under a `bible`-prefixed namespace in the host's
//! key/value store. Hosts may persist their own UI preferences through the
//! same store as long as they stay out of these keys.

/// Current translation identifier.
pub const TRANSLATION: &str = "bibleTranslation";

/// Current book name.
pub const CURRENT_BOOK: &str = "bibleCurrentBook";

/// Current chapter number, stored as its decimal string form.
pub const CURRENT_CHAPTER: &str = "bibleCurrentChapter";

/// Visit history, stored as a JSON array of reference/timestamp entries.
pub const HISTORY: &str = "bibleHistory";

/// Bookmarks, stored as a JSON array of canonical reference strings.
pub const BOOKMARKS: &str = "bibleBookmarks";

/// Translation ids that have loaded successfully before, stored as a JSON
/// array of strings. Drives background preloading at startup.
pub const LOADED_TRANSLATIONS: &str = "bibleLoadedTranslations";
