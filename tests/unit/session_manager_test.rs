//! Unit tests for the session manager: generate, select and clear flows,
//! write-through persistence and storage failure handling.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use linkqr::managers::history_store::{HistoryStore, KeyValueStore};
use linkqr::managers::session_manager::{SessionManager, SessionManagerTrait};
use linkqr::services::qr_encoder::{PngQrEncoder, QrEncoder, PNG_DATA_URL_PREFIX};
use linkqr::types::entry::QrCodeEntry;
use linkqr::types::errors::{EncodeError, GenerateError, StorageError};

/// Shared in-memory key-value store so a test can reopen a session on it.
#[derive(Clone, Default)]
struct MemoryStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.borrow().get(key).cloned())
    }
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}

/// Store whose every operation fails.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::ReadFailed("unavailable".to_string()))
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("unavailable".to_string()))
    }
    fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("unavailable".to_string()))
    }
}

struct FailingEncoder;

impl QrEncoder for FailingEncoder {
    fn encode(&self, _text: &str) -> Result<String, EncodeError> {
        Err(EncodeError::Render("boom".to_string()))
    }
}

fn encoder() -> Arc<dyn QrEncoder> {
    Arc::new(PngQrEncoder::new(2))
}

fn session(store: &MemoryStore) -> SessionManager {
    SessionManager::new(HistoryStore::new(Box::new(store.clone())), 20)
}

fn urls(session: &SessionManager) -> Vec<String> {
    session.history().iter().map(|e| e.url.clone()).collect()
}

#[test]
fn test_fresh_session_is_empty() {
    let session = session(&MemoryStore::default());
    assert!(session.history().is_empty());
    assert!(session.current_selection().is_none());
    assert!(!session.is_loading());
    assert!(session.error_message().is_none());
}

#[tokio::test]
async fn test_generate_valid_url_creates_entry() {
    let store = MemoryStore::default();
    let mut session = session(&store);

    let entry = session.generate("https://example.com", encoder()).await.unwrap();

    assert_eq!(entry.url, "https://example.com");
    assert!(entry.image.starts_with(PNG_DATA_URL_PREFIX));
    assert_eq!(entry.id, entry.created_at.to_string());
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_selection(), Some(&entry));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_generate_invalid_url_leaves_state_untouched() {
    let mut session = session(&MemoryStore::default());
    let first = session.generate("https://example.com", encoder()).await.unwrap();

    let result = session.generate("not a url", encoder()).await;

    assert!(matches!(result, Err(GenerateError::Invalid(_))));
    assert_eq!(session.error_message(), Some("Please enter a valid URL"));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_selection(), Some(&first));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_generate_trims_input() {
    let mut session = session(&MemoryStore::default());
    let entry = session.generate("  https://example.com \n", encoder()).await.unwrap();
    assert_eq!(entry.url, "https://example.com");
}

#[tokio::test]
async fn test_successful_generate_clears_previous_error() {
    let mut session = session(&MemoryStore::default());
    let _ = session.generate("", encoder()).await;
    assert!(session.error_message().is_some());

    session.generate("https://example.com", encoder()).await.unwrap();
    assert!(session.error_message().is_none());
}

#[tokio::test]
async fn test_same_url_twice_keeps_one_entry() {
    let mut session = session(&MemoryStore::default());
    let first = session.generate("https://example.com", encoder()).await.unwrap();
    session.generate("https://other.com", encoder()).await.unwrap();
    let again = session.generate("https://example.com", encoder()).await.unwrap();

    assert_ne!(first.id, again.id);
    assert!(again.created_at > first.created_at);
    assert_eq!(urls(&session), vec!["https://example.com", "https://other.com"]);
    assert_eq!(session.current_selection(), Some(&again));
}

#[tokio::test]
async fn test_twenty_one_urls_keep_newest_twenty() {
    let mut session = session(&MemoryStore::default());
    for i in 0..21 {
        session
            .generate(&format!("https://site{}.com", i), encoder())
            .await
            .unwrap();
    }

    let history = session.history();
    assert_eq!(history.len(), 20);
    assert_eq!(history[0].url, "https://site20.com");
    assert_eq!(history[19].url, "https://site1.com");
    let ids: std::collections::HashSet<&str> = history.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_encode_failure_sets_message() {
    let mut session = session(&MemoryStore::default());
    let result = session.generate("https://example.com", Arc::new(FailingEncoder)).await;

    assert!(matches!(result, Err(GenerateError::Encode(_))));
    assert_eq!(
        session.error_message(),
        Some("Failed to generate QR code. Please try again.")
    );
    assert!(session.history().is_empty());
    assert!(!session.is_loading());
}

#[test]
fn test_begin_while_loading_is_busy() {
    let mut session = session(&MemoryStore::default());
    session.begin_generate("https://a.com").unwrap();
    assert!(session.is_loading());
    assert_eq!(session.begin_generate("https://b.com"), Err(GenerateError::Busy));
}

#[test]
fn test_complete_without_begin_is_rejected() {
    let mut session = session(&MemoryStore::default());
    let result = session.complete_generate(Ok("data:image/png;base64,AAAA".to_string()));
    assert_eq!(result, Err(GenerateError::NotPending));
    assert!(session.history().is_empty());
}

#[test]
fn test_split_generate_records_pending_url() {
    let mut session = session(&MemoryStore::default());
    let url = session.begin_generate(" https://a.com ").unwrap();
    assert_eq!(url, "https://a.com");

    let entry = session
        .complete_generate(Ok("data:image/png;base64,AAAA".to_string()))
        .unwrap();
    assert_eq!(entry.url, "https://a.com");
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_select_changes_current_without_reordering() {
    let mut session = session(&MemoryStore::default());
    let a = session.generate("https://a.com", encoder()).await.unwrap();
    session.generate("https://b.com", encoder()).await.unwrap();

    let selected = session.select(&a.id).cloned();
    assert_eq!(selected, Some(a.clone()));
    assert_eq!(session.current_selection(), Some(&a));
    assert_eq!(urls(&session), vec!["https://b.com", "https://a.com"]);
}

#[tokio::test]
async fn test_select_unknown_id_is_noop() {
    let mut session = session(&MemoryStore::default());
    let b = session.generate("https://b.com", encoder()).await.unwrap();

    assert!(session.select("does-not-exist").is_none());
    assert_eq!(session.current_selection(), Some(&b));
}

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let store = MemoryStore::default();
    let mut session = session(&store);
    session.generate("https://a.com", encoder()).await.unwrap();

    assert!(!session.clear_history(false));
    assert_eq!(session.history().len(), 1);

    assert!(session.clear_history(true));
    assert!(session.history().is_empty());
    assert!(session.current_selection().is_none());

    let reopened = SessionManager::new(HistoryStore::new(Box::new(store.clone())), 20);
    assert!(reopened.history().is_empty());
}

#[tokio::test]
async fn test_history_survives_reopen() {
    let store = MemoryStore::default();
    let (a, b) = {
        let mut session = session(&store);
        let a = session.generate("https://a.com", encoder()).await.unwrap();
        let b = session.generate("https://b.com", encoder()).await.unwrap();
        (a, b)
    };

    let reopened = session(&store);
    assert_eq!(reopened.history(), &[b.clone(), a][..]);
    assert_eq!(reopened.current_selection(), Some(&b));
}

#[tokio::test]
async fn test_reopen_after_restart_issues_fresh_ids() {
    let store = MemoryStore::default();
    let first = {
        let mut session = session(&store);
        session.generate("https://a.com", encoder()).await.unwrap()
    };

    let mut reopened = session(&store);
    let second = reopened.generate("https://b.com", encoder()).await.unwrap();
    assert!(second.created_at > first.created_at);
}

#[test]
fn test_stored_history_is_normalized_on_load() {
    let store = MemoryStore::default();
    let stored: Vec<QrCodeEntry> = (0..25)
        .map(|i| QrCodeEntry::new(&format!("https://s{}.com", i % 22), "x".to_string(), 100 - i))
        .collect();
    store
        .set("qr-history", &serde_json::to_string(&stored).unwrap())
        .unwrap();

    let session = session(&store);
    assert_eq!(session.history().len(), 20);
    assert_eq!(session.history()[0].url, "https://s0.com");
}

#[test]
fn test_corrupt_store_starts_empty() {
    let store = MemoryStore::default();
    store.set("qr-history", "garbage").unwrap();
    let session = session(&store);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_broken_store_does_not_block_generation() {
    let mut session = SessionManager::new(HistoryStore::new(Box::new(BrokenStore)), 20);
    assert!(session.history().is_empty());

    let entry = session.generate("https://example.com", encoder()).await.unwrap();
    assert_eq!(session.current_selection(), Some(&entry));
    assert!(session.clear_history(true));
    assert!(session.error_message().is_none());
}

#[tokio::test]
async fn test_shrinking_capacity_repairs_selection() {
    let mut session = session(&MemoryStore::default());
    let a = session.generate("https://a.com", encoder()).await.unwrap();
    session.generate("https://b.com", encoder()).await.unwrap();
    session.select(&a.id);

    session.set_capacity(1);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_selection().map(|e| e.url.as_str()), Some("https://b.com"));
}

#[tokio::test]
async fn test_snapshot_serializes_camel_case() {
    let mut session = session(&MemoryStore::default());
    session.generate("https://a.com", encoder()).await.unwrap();

    let value = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(value["loading"], false);
    assert!(value["error"].is_null());
    assert_eq!(value["current"]["url"], "https://a.com");
    assert!(value["history"][0]["createdAt"].is_i64());
}

#[test]
fn test_future_dated_stored_entry_does_not_overflow_ids() {
    let store = MemoryStore::default();
    let stored = vec![QrCodeEntry::new("https://a.com", "x".to_string(), i64::MAX)];
    store
        .set("qr-history", &serde_json::to_string(&stored).unwrap())
        .unwrap();

    let mut session = session(&store);
    session.begin_generate("https://b.com").unwrap();
    let entry = session
        .complete_generate(Ok("data:image/png;base64,AAAA".to_string()))
        .unwrap();

    assert_ne!(entry.id, stored[0].id);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.current_selection(), Some(&entry));
}
