use std::cell::Cell;
use std::fs;
use std::path::Path;

use scriptura::library::{CorpusFetcher, FileFetcher};
use scriptura::storage::{JsonFileStore, MemoryStore};
use scriptura::{initialize, Catalog, LoadStatus, Reference, ScriptureSession, TranslationEntry};
use tempfile::TempDir;

fn kjv_document() -> String {
    serde_json::json!({
        "books": [
            {
                "name": "Genesis",
                "testament": "old",
                "chapters": [
                    { "chapter": 1, "verses": [
                        { "verse": 1, "text": "In the beginning God created the heaven and the earth." },
                        { "verse": 2, "text": "And the earth was without form, and void." },
                        { "verse": 3, "text": "And God said, Let there be light: and there was light." },
                        { "verse": 4, "text": "And God saw the light, that it was good." },
                        { "verse": 5, "text": "And God called the light Day, and the darkness he called Night." }
                    ] },
                    { "chapter": 2, "verses": [
                        { "verse": 1, "text": "Thus the heavens and the earth were finished." },
                        { "verse": 2, "text": "And on the seventh day God ended his work." },
                        { "verse": 3, "text": "And God blessed the seventh day." }
                    ] },
                    { "chapter": 3, "verses": [
                        { "verse": 1, "text": "Now the serpent was more subtil than any beast of the field." },
                        { "verse": 2, "text": "And the woman said unto the serpent, We may eat of the fruit." },
                        { "verse": 3, "text": "But of the fruit of the tree in the midst of the garden, ye shall not eat." },
                        { "verse": 4, "text": "And the serpent said unto the woman, Ye shall not surely die." }
                    ] }
                ]
            },
            {
                "name": "Exodus",
                "testament": "old",
                "chapters": [
                    { "chapter": 1, "verses": [
                        { "verse": 1, "text": "Now these are the names of the children of Israel." },
                        { "verse": 2, "text": "Reuben, Simeon, Levi, and Judah [the sons of Leah]." }
                    ] },
                    { "chapter": 2, "verses": [
                        { "verse": 1, "text": "And there went a man of the house of Levi." },
                        { "verse": 2, "text": "And the woman conceived, and bare a son." }
                    ] }
                ]
            }
        ]
    })
    .to_string()
}

fn twi_document() -> String {
    serde_json::json!({
        "books": [
            {
                "name": "Genesis",
                "testament": "old",
                "chapters": [
                    { "chapter": 1, "verses": [
                        { "verse": 1, "text": "Mfiase no Onyankopon boo osoro ne asase." }
                    ] }
                ]
            }
        ]
    })
    .to_string()
}

fn corpus_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("KJV.json"), kjv_document()).unwrap();
    fs::write(dir.path().join("TWI.json"), twi_document()).unwrap();
    dir
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        TranslationEntry::new("KJV", "King James Version", "KJV.json"),
        TranslationEntry::new("TWI", "Twi", "TWI.json"),
    ])
    .unwrap()
}

fn loaded_session(corpora: &Path) -> ScriptureSession {
    let mut session = initialize(catalog(), Box::new(MemoryStore::new()));
    session
        .ensure_loaded("KJV", &FileFetcher::new(corpora))
        .unwrap();
    session
}

fn canonical_history(session: &ScriptureSession) -> Vec<String> {
    session
        .history()
        .entries()
        .iter()
        .map(|entry| entry.reference.canonical())
        .collect()
}

struct CountingFetcher {
    inner: FileFetcher,
    calls: Cell<usize>,
}

impl CorpusFetcher for CountingFetcher {
    fn fetch(&self, locator: &str) -> scriptura::Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.inner.fetch(locator)
    }
}

#[test]
fn browsing_builds_history_in_presentation_order() {
    let corpora = corpus_dir();
    let mut session = loaded_session(corpora.path());

    session.set_book("Genesis");
    session.set_chapter(3);
    session.navigate_to_reference(&Reference::new("Genesis", 3, Some(2)));

    // Book and chapter switches record the position being left; the jump
    // records its destination.
    assert_eq!(
        canonical_history(&session),
        vec!["Genesis 3:2", "Genesis 1:1", "Genesis 1:1"]
    );
    assert_eq!(session.navigation().chapter, 3);
    assert_eq!(session.navigation().verse, Some(2));
}

#[test]
fn out_of_range_chapters_are_ignored() {
    let corpora = corpus_dir();
    let mut session = loaded_session(corpora.path());

    session.set_chapter(99);
    session.set_chapter(0);

    assert_eq!(session.navigation().chapter, 1);
    assert!(session.history().is_empty());
}

#[test]
fn verse_stepping_rolls_across_chapter_boundaries() {
    let corpora = corpus_dir();
    let mut session = loaded_session(corpora.path());

    session.set_verse(Some(5));
    session.next_verse();
    assert_eq!(session.navigation().chapter, 2);
    assert_eq!(session.navigation().verse, Some(1));

    session.previous_verse();
    assert_eq!(session.navigation().chapter, 1);
    assert_eq!(session.navigation().verse, Some(1));
}

#[test]
fn session_state_survives_restart() {
    let corpora = corpus_dir();
    let state_dir = tempfile::tempdir().unwrap();
    let state_path = state_dir.path().join("session.json");
    let fetcher = FileFetcher::new(corpora.path());

    {
        let store = JsonFileStore::new(state_path.clone()).unwrap();
        let mut session = initialize(catalog(), Box::new(store));
        session.ensure_loaded("KJV", &fetcher).unwrap();
        session.set_book("Exodus");
        session.set_chapter(2);
        session.bookmark_current();
    }

    let store = JsonFileStore::new(state_path).unwrap();
    let mut session = initialize(catalog(), Box::new(store));

    assert_eq!(session.navigation().book, "Exodus");
    assert_eq!(session.navigation().chapter, 2);
    assert_eq!(session.history().len(), 2);
    assert!(session.is_bookmarked(&Reference::new("Exodus", 2, Some(1))));

    // The previous session's translations come back as background jobs.
    let jobs = session.preload_jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].translation_id, "KJV");

    let outcome = fetcher.fetch(&jobs[0].source_locator);
    session
        .complete_load(&jobs[0].translation_id, outcome)
        .unwrap();
    assert_eq!(session.current_verses().len(), 2);
}

#[test]
fn translations_fetch_at_most_once() {
    let corpora = corpus_dir();
    let fetcher = CountingFetcher {
        inner: FileFetcher::new(corpora.path()),
        calls: Cell::new(0),
    };
    let mut session = initialize(catalog(), Box::new(MemoryStore::new()));

    session.ensure_loaded("KJV", &fetcher).unwrap();
    session.ensure_loaded("KJV", &fetcher).unwrap();
    session.set_translation("TWI").unwrap();
    session.set_translation("KJV").unwrap();
    assert_eq!(
        session.ensure_loaded("KJV", &fetcher).unwrap(),
        LoadStatus::Loaded
    );

    assert_eq!(fetcher.calls.get(), 1);
}

#[test]
fn failed_load_can_be_retried() {
    let corpora = corpus_dir();
    let mut session = initialize(catalog(), Box::new(MemoryStore::new()));

    let missing = FileFetcher::new(corpora.path().join("nowhere"));
    assert!(session.ensure_loaded("KJV", &missing).is_err());
    assert_eq!(session.load_status("KJV"), LoadStatus::Failed);

    let fetcher = FileFetcher::new(corpora.path());
    assert_eq!(
        session.ensure_loaded("KJV", &fetcher).unwrap(),
        LoadStatus::Loaded
    );
    assert_eq!(session.books().len(), 2);
}

#[test]
fn switching_translations_preserves_position() {
    let corpora = corpus_dir();
    let mut session = loaded_session(corpora.path());
    let fetcher = FileFetcher::new(corpora.path());

    session.set_book("Exodus");
    session.ensure_loaded("TWI", &fetcher).unwrap();
    session.set_translation("TWI").unwrap();

    // TWI has no Exodus; the position stays and content reads as empty.
    assert_eq!(session.navigation().book, "Exodus");
    assert!(session.current_verses().is_empty());
    assert!(session.available_chapters().is_empty());

    session.set_translation("KJV").unwrap();
    assert_eq!(session.current_verses().len(), 2);
}

#[test]
fn search_modes_cover_presentation_behavior() {
    let corpora = corpus_dir();
    let session = loaded_session(corpora.path());

    let whole = session.search("light", true, true);
    assert_eq!(whole.len(), 3);
    assert!(whole.iter().all(|r| r.book == "Genesis" && r.chapter == 1));

    // Brackets are stripped from the query, and matches keep original text.
    let bracketed = session.search("[sons]", true, false);
    assert_eq!(bracketed.len(), 1);
    assert_eq!(
        bracketed[0].text,
        "Reuben, Simeon, Levi, and Judah [the sons of Leah]."
    );

    assert!(session.search("   ", false, false).is_empty());
}
