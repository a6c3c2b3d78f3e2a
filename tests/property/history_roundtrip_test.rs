//! Property-based tests for history persistence.
//!
//! Serializing a history and reading it back must yield the same entries in
//! the same order, both as raw JSON and through the SQLite key-value store.

use std::sync::Arc;

use linkqr::database::Database;
use linkqr::managers::history_store::{deserialize_history, serialize_history, HistoryStore};
use linkqr::types::entry::QrCodeEntry;
use proptest::prelude::*;

fn arb_entry() -> impl Strategy<Value = QrCodeEntry> {
    (
        "https://[a-z]{1,12}\\.(com|org|io)(/[a-zA-Z0-9_-]{0,12})?",
        "[A-Za-z0-9+/]{0,40}",
        0i64..4_000_000_000_000,
    )
        .prop_map(|(url, b64, ts)| {
            QrCodeEntry::new(&url, format!("data:image/png;base64,{}", b64), ts)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn json_roundtrip_preserves_entries(entries in proptest::collection::vec(arb_entry(), 0..20)) {
        let raw = serialize_history(&entries).unwrap();
        let back = deserialize_history(&raw).unwrap();
        prop_assert_eq!(back, entries);
    }

    #[test]
    fn store_roundtrip_preserves_entries(entries in proptest::collection::vec(arb_entry(), 0..20)) {
        let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
        let store = HistoryStore::sqlite(db);
        store.save(&entries).unwrap();
        prop_assert_eq!(store.load().unwrap(), Some(entries));
    }
}
