//! Session Manager for linkqr.
//!
//! Owns the live state of the generator: the recent history, the current
//! selection, the loading flag and the last user-visible error. Every history
//! mutation is written through [`HistoryStore`]; storage failures are logged
//! and never reach the user.
//!
//! Generation is split in two so a UI can run the encoder elsewhere:
//! [`SessionManager::begin_generate`] validates and marks the session as
//! loading, [`SessionManager::complete_generate`] applies the encoder result.
//! [`SessionManager::generate`] chains both around a blocking encoder task.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::managers::history_manager::{HistoryManagerTrait, QrHistory};
use crate::managers::history_store::HistoryStore;
use crate::services::qr_encoder::QrEncoder;
use crate::services::url_validator::validate_url;
use crate::types::entry::QrCodeEntry;
use crate::types::errors::{EncodeError, GenerateError, ENCODE_FAILED_MESSAGE, INVALID_URL_MESSAGE};

/// Trait defining the synchronous session operations.
pub trait SessionManagerTrait {
    fn begin_generate(&mut self, input: &str) -> Result<String, GenerateError>;
    fn complete_generate(
        &mut self,
        result: Result<String, EncodeError>,
    ) -> Result<QrCodeEntry, GenerateError>;
    fn select(&mut self, id: &str) -> Option<&QrCodeEntry>;
    fn clear_history(&mut self, confirmed: bool) -> bool;
    fn current_selection(&self) -> Option<&QrCodeEntry>;
    fn history(&self) -> &[QrCodeEntry];
}

/// Serializable view of the session for the UI and RPC layers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot<'a> {
    pub history: &'a [QrCodeEntry],
    pub current: Option<&'a QrCodeEntry>,
    pub loading: bool,
    pub error: Option<&'a str>,
}

/// Live generator state backed by a [`HistoryStore`].
pub struct SessionManager {
    store: HistoryStore,
    history: QrHistory,
    current_id: Option<String>,
    loading: bool,
    pending_url: Option<String>,
    error: Option<String>,
    last_created_at: i64,
}

impl SessionManager {
    /// Creates a session and loads the stored history once.
    ///
    /// A missing key starts empty. An unreadable or unparseable store is
    /// logged and also starts empty. Otherwise the most recent entry becomes
    /// the current selection.
    pub fn new(store: HistoryStore, capacity: usize) -> Self {
        let history = match store.load() {
            Ok(Some(entries)) => QrHistory::from_entries(entries, capacity),
            Ok(None) => QrHistory::new(capacity),
            Err(e) => {
                warn!(error = %e, "failed to load QR history; starting empty");
                QrHistory::new(capacity)
            }
        };

        let current_id = history.first().map(|e| e.id.clone());
        // Future-dated stored entries must not push new ids toward overflow.
        let now = now_millis();
        let last_created_at = history
            .entries()
            .iter()
            .map(|e| e.created_at)
            .filter(|&ts| ts <= now)
            .max()
            .unwrap_or(0);

        info!(entries = history.len(), "QR history loaded");

        Self {
            store,
            history,
            current_id,
            loading: false,
            pending_url: None,
            error: None,
            last_created_at,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last user-visible error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Changes the history capacity and persists if entries were dropped.
    pub fn set_capacity(&mut self, capacity: usize) {
        let before = self.history.len();
        self.history.set_capacity(capacity);
        if self.history.len() != before {
            self.repair_selection();
            self.persist();
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            history: self.history.entries(),
            current: self.current_selection(),
            loading: self.loading,
            error: self.error.as_deref(),
        }
    }

    /// Validates `input`, encodes it with `encoder` on a blocking task and
    /// records the result.
    pub async fn generate(
        &mut self,
        input: &str,
        encoder: Arc<dyn QrEncoder>,
    ) -> Result<QrCodeEntry, GenerateError> {
        let url = self.begin_generate(input)?;
        let result = run_encoder(encoder, url).await;
        self.complete_generate(result)
    }

    fn next_timestamp(&mut self) -> i64 {
        let mut ts = now_millis().max(self.last_created_at.saturating_add(1));
        while self.history.get(&ts.to_string()).is_some() && ts < i64::MAX {
            ts += 1;
        }
        self.last_created_at = ts;
        ts
    }

    /// Points the selection back at an entry that exists in history.
    fn repair_selection(&mut self) {
        let still_present = self
            .current_id
            .as_deref()
            .map(|id| self.history.get(id).is_some())
            .unwrap_or(true);
        if !still_present {
            self.current_id = self.history.first().map(|e| e.id.clone());
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(self.history.entries()) {
            warn!(error = %e, "failed to persist QR history");
        }
    }
}

impl SessionManagerTrait for SessionManager {
    /// Validates the input and marks the session as loading.
    ///
    /// Returns the URL to hand to the encoder. Rejected input sets the
    /// validation message and leaves history and selection untouched.
    fn begin_generate(&mut self, input: &str) -> Result<String, GenerateError> {
        if self.loading {
            return Err(GenerateError::Busy);
        }

        let url = match validate_url(input) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "rejected QR input");
                self.error = Some(INVALID_URL_MESSAGE.to_string());
                return Err(GenerateError::Invalid(e));
            }
        };

        self.error = None;
        self.loading = true;
        self.pending_url = Some(url.clone());
        Ok(url)
    }

    /// Applies the encoder result for the pending generate.
    ///
    /// On success the new entry is inserted (replacing any entry with the
    /// same URL), becomes the current selection and the history is persisted.
    fn complete_generate(
        &mut self,
        result: Result<String, EncodeError>,
    ) -> Result<QrCodeEntry, GenerateError> {
        let url = match (self.loading, self.pending_url.take()) {
            (true, Some(url)) => url,
            _ => return Err(GenerateError::NotPending),
        };
        self.loading = false;

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, url = %url, "QR encoding failed");
                self.error = Some(ENCODE_FAILED_MESSAGE.to_string());
                return Err(GenerateError::Encode(e));
            }
        };

        let created_at = self.next_timestamp();
        let entry = QrCodeEntry::new(&url, image, created_at);
        self.history.insert(entry.clone());
        self.current_id = Some(entry.id.clone());
        self.persist();

        info!(id = %entry.id, url = %entry.url, "QR code generated");
        Ok(entry)
    }

    /// Makes the entry with `id` current. Unknown ids change nothing.
    fn select(&mut self, id: &str) -> Option<&QrCodeEntry> {
        if self.history.get(id).is_none() {
            return None;
        }
        self.current_id = Some(id.to_string());
        self.history.get(id)
    }

    /// Empties history and selection when `confirmed`; returns whether it did.
    fn clear_history(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.history.clear();
        self.current_id = None;
        self.persist();
        info!("QR history cleared");
        true
    }

    fn current_selection(&self) -> Option<&QrCodeEntry> {
        self.current_id.as_deref().and_then(|id| self.history.get(id))
    }

    fn history(&self) -> &[QrCodeEntry] {
        self.history.entries()
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Runs `encoder` on tokio's blocking pool.
pub async fn run_encoder(encoder: Arc<dyn QrEncoder>, text: String) -> Result<String, EncodeError> {
    tokio::task::spawn_blocking(move || encoder.encode(&text))
        .await
        .map_err(|e| EncodeError::TaskFailed(e.to_string()))?
}
