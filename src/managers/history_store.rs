//! Durable storage for the QR history.
//!
//! [`KeyValueStore`] is the opaque string-keyed substrate; [`SqliteKeyValueStore`]
//! backs it with the `kv_store` table. [`HistoryStore`] serializes the whole
//! history as JSON under a single key.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::types::entry::QrCodeEntry;
use crate::types::errors::StorageError;

/// Key under which the serialized history lives.
pub const HISTORY_STORAGE_KEY: &str = "qr-history";

/// String-keyed get/set/delete store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Key-value store on the SQLite `kv_store` table.
pub struct SqliteKeyValueStore {
    db: Arc<Database>,
}

impl SqliteKeyValueStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn now_ts() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, Self::now_ts()],
            )
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

/// Serializes a history list to its stored JSON form.
pub fn serialize_history(entries: &[QrCodeEntry]) -> Result<String, StorageError> {
    serde_json::to_string(entries).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Parses a stored history list.
pub fn deserialize_history(raw: &str) -> Result<Vec<QrCodeEntry>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Reads and writes the history list under [`HISTORY_STORAGE_KEY`].
pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Convenience constructor over the SQLite key-value table.
    pub fn sqlite(db: Arc<Database>) -> Self {
        Self::new(Box::new(SqliteKeyValueStore::new(db)))
    }

    /// Returns the stored history, or `None` if nothing was ever saved.
    pub fn load(&self) -> Result<Option<Vec<QrCodeEntry>>, StorageError> {
        match self.store.get(HISTORY_STORAGE_KEY)? {
            Some(raw) => deserialize_history(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Overwrites the stored history with `entries`.
    pub fn save(&self, entries: &[QrCodeEntry]) -> Result<(), StorageError> {
        let json = serialize_history(entries)?;
        self.store.set(HISTORY_STORAGE_KEY, &json)
    }

    /// Removes the stored history key entirely.
    pub fn remove(&self) -> Result<(), StorageError> {
        self.store.delete(HISTORY_STORAGE_KEY)
    }
}
