//! History Manager for linkqr.
//!
//! Keeps the recent QR codes as a bounded, deduplicated, newest-first list.
//! Holds no storage handle; persistence is driven by the session manager.

use crate::types::entry::QrCodeEntry;
use crate::types::settings::DEFAULT_HISTORY_CAPACITY;

/// Trait defining history list operations.
pub trait HistoryManagerTrait {
    fn insert(&mut self, entry: QrCodeEntry);
    fn get(&self, id: &str) -> Option<&QrCodeEntry>;
    fn entries(&self) -> &[QrCodeEntry];
    fn clear(&mut self);
    fn capacity(&self) -> usize;
}

/// Recency-ordered list with at most one entry per URL.
#[derive(Debug, Clone, PartialEq)]
pub struct QrHistory {
    entries: Vec<QrCodeEntry>,
    capacity: usize,
}

impl Default for QrHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl QrHistory {
    /// Creates an empty history. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Builds a history from previously stored entries.
    ///
    /// Stored data is not trusted to honor the invariants, so the list is
    /// re-normalized: the first occurrence of each URL is kept and the result
    /// is cut to `capacity`.
    pub fn from_entries(entries: Vec<QrCodeEntry>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for entry in entries {
            if history.entries.iter().any(|e| e.url == entry.url) {
                continue;
            }
            history.entries.push(entry);
        }
        history.entries.truncate(history.capacity);
        history
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry, if any.
    pub fn first(&self) -> Option<&QrCodeEntry> {
        self.entries.first()
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.entries.iter().any(|e| e.url == url)
    }

    /// Changes the capacity, dropping the oldest entries if it shrank.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.entries.truncate(self.capacity);
    }
}

impl HistoryManagerTrait for QrHistory {
    /// Removes any entry with the same URL, prepends `entry`, then truncates
    /// to capacity.
    fn insert(&mut self, entry: QrCodeEntry) {
        self.entries.retain(|e| e.url != entry.url);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    fn get(&self, id: &str) -> Option<&QrCodeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn entries(&self) -> &[QrCodeEntry] {
        &self.entries
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
