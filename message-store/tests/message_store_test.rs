//! Integration tests for [`message_store::MessageStore`] backed by SQLite.
//!
//! Covers translation round trips, byte-exact fallback, case sensitivity, recording guards and
//! concurrent recording of the same missing message.

use std::sync::Arc;

use message_store::{
    MessageRepository, MessageStore, RecordOutcome, RequestOrigin, SqliteMessageRepository,
    SqlitePoolManager, StaticMessageQuery, StoreSettings,
};

async fn sqlite_store(settings: StoreSettings) -> (MessageStore, SqliteMessageRepository) {
    let repo = SqliteMessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");
    let store = MessageStore::new(Arc::new(repo.clone()), settings);
    (store, repo)
}

fn recording() -> StoreSettings {
    StoreSettings::new(["site"]).with_record_missing(true)
}

/// **Test: Translation round trip.**
///
/// **Setup:** Administrator stores `site/Hello` with French text "Bonjour".
/// **Action:** Translate into `fr` and into `de`.
/// **Expected:** "Bonjour" for `fr`; the source text for `de`; no extra source row.
#[tokio::test]
async fn test_round_trip() {
    let (store, repo) = sqlite_store(recording()).await;
    let source = repo.insert_source_message("site", "Hello").await.unwrap();
    repo.save_translation(source.id, "fr", "Bonjour").await.unwrap();

    assert_eq!(store.translate("site", "Hello", "fr").await.unwrap(), "Bonjour");
    assert_eq!(store.translate("site", "Hello", "de").await.unwrap(), "Hello");
    assert_eq!(repo.get_stats().await.unwrap().source_messages, 1);
}

/// **Test: Lowercase lookup does not match a capitalized source.**
///
/// **Setup:** `site/Hello` translated to French.
/// **Action:** Translate `"hello"` into `fr`.
/// **Expected:** Returns "hello"; "hello" is recorded as its own row next to "Hello".
#[tokio::test]
async fn test_case_sensitive_lookup_and_recording() {
    let (store, repo) = sqlite_store(recording()).await;
    let source = repo.insert_source_message("site", "Hello").await.unwrap();
    repo.save_translation(source.id, "fr", "Bonjour").await.unwrap();

    assert_eq!(store.translate("site", "hello", "fr").await.unwrap(), "hello");

    let lower = repo
        .find_source_message("site", "hello")
        .await
        .unwrap()
        .expect("Lowercase variant should be recorded");
    assert_ne!(lower.id, source.id);
    assert_eq!(repo.get_stats().await.unwrap().source_messages, 2);
}

/// **Test: Fallback returns the message byte for byte.**
#[tokio::test]
async fn test_fallback_identity() {
    let (store, _repo) = sqlite_store(recording()).await;

    for message in ["Hello", "  padded  ", "Caf\u{e9}", "Cafe\u{301}", "{name} has {n} items"] {
        let text = store.translate("site", message, "fr").await.unwrap();
        assert_eq!(text.as_bytes(), message.as_bytes());
    }
}

/// **Test: Unicode normalization forms are distinct messages.**
#[tokio::test]
async fn test_normalization_forms_are_distinct() {
    let (store, repo) = sqlite_store(recording()).await;

    store.translate("site", "Caf\u{e9}", "fr").await.unwrap();
    store.translate("site", "Cafe\u{301}", "fr").await.unwrap();

    assert_eq!(repo.get_stats().await.unwrap().source_messages, 2);
}

/// **Test: Misses are recorded once.**
///
/// **Action:** Translate the same unknown message three times.
/// **Expected:** One source row; later calls report it as already known.
#[tokio::test]
async fn test_miss_is_recorded_once() {
    let (store, repo) = sqlite_store(recording()).await;

    for _ in 0..3 {
        store.translate("site", "Sign in", "fr").await.unwrap();
    }

    assert_eq!(repo.get_stats().await.unwrap().source_messages, 1);
    let outcome = store
        .record_missing_translation("site", "Sign in", RequestOrigin::Site)
        .await;
    assert_eq!(outcome, RecordOutcome::AlreadyKnown);
}

/// **Test: Guards keep storage untouched.**
///
/// **Expected:** Nothing is recorded with recording disabled, for a non-site request when
/// limited to site requests, for an empty message, or for an unmanaged category.
#[tokio::test]
async fn test_guards_short_circuit() {
    let (disabled, repo) = sqlite_store(StoreSettings::new(["site"])).await;
    for i in 0..10 {
        disabled.translate("site", &format!("Miss {}", i), "fr").await.unwrap();
    }
    assert_eq!(repo.get_stats().await.unwrap().source_messages, 0);

    let site_only = disabled.reconfigure(recording().with_site_requests_only(true));
    site_only
        .translate_with_origin(RequestOrigin::ControlPanel, "site", "Entries", "fr")
        .await
        .unwrap();
    site_only
        .translate_with_origin(RequestOrigin::Console, "site", "Entries", "fr")
        .await
        .unwrap();
    assert_eq!(repo.get_stats().await.unwrap().source_messages, 0);

    assert_eq!(site_only.translate("site", "", "fr").await.unwrap(), "");
    assert_eq!(
        site_only.translate("admin", "Entries", "fr").await.unwrap(),
        "Entries"
    );
    assert_eq!(repo.get_stats().await.unwrap().source_messages, 0);

    site_only.translate("site", "Entries", "fr").await.unwrap();
    assert_eq!(repo.get_stats().await.unwrap().source_messages, 1);
}

/// **Test: Static messages through the store.**
#[tokio::test]
async fn test_static_messages_after_recording() {
    let (store, repo) = sqlite_store(recording()).await;
    store.translate("site", "Read more", "fr").await.unwrap();
    let source = repo
        .find_source_message("site", "Read more")
        .await
        .unwrap()
        .unwrap();
    repo.save_translation(source.id, "fr", "Lire la suite").await.unwrap();

    let messages = store
        .static_messages(&StaticMessageQuery::new("fr").with_category("site"))
        .await
        .unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].key, "Read more");
    assert_eq!(messages[0].message, "Lire la suite");
    assert_eq!(store.translate("site", "Read more", "fr").await.unwrap(), "Lire la suite");
}

/// **Test: Concurrent misses on one unseen message produce exactly one row.**
///
/// **Setup:** On-disk database (WAL) with a 4-connection pool, recording enabled.
/// **Action:** 24 tasks translate the same unseen message at once.
/// **Expected:** Every call returns the source text without error; one source row exists.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_record_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("race.db").display());
    // Fewer connections than tasks, so callers also queue on the pool.
    let pool_manager = SqlitePoolManager::with_max_connections(&url, 4).await.unwrap();
    let repo = SqliteMessageRepository::from_pool_manager(pool_manager)
        .await
        .unwrap();
    let store = MessageStore::new(Arc::new(repo.clone()), recording());

    let mut handles = Vec::new();
    for _ in 0..24 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.translate("site", "Brand new string", "fr").await
        }));
    }
    for handle in handles {
        let text = handle.await.unwrap().expect("translate must not fail");
        assert_eq!(text, "Brand new string");
    }

    assert_eq!(repo.get_stats().await.unwrap().source_messages, 1);
    assert!(repo
        .find_source_message("site", "Brand new string")
        .await
        .unwrap()
        .is_some());
}
