use serde::{Deserialize, Serialize};

/// Default number of entries kept in the recent history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Default pixels per QR module in the rendered PNG.
pub const DEFAULT_MODULE_SCALE: u32 = 8;

/// Largest accepted pixels per QR module.
pub const MAX_MODULE_SCALE: u32 = 64;

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub history: HistorySettings,
    pub encoder: EncoderSettings,
    pub storage: StorageSettings,
    pub export: ExportSettings,
}

/// Recent-history settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySettings {
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// QR rendering settings. Error correction, margin and palette are fixed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncoderSettings {
    pub module_scale: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            module_scale: DEFAULT_MODULE_SCALE,
        }
    }
}

/// Where the history database lives. `None` means the platform data dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub database_path: Option<String>,
}

/// Where downloaded QR images are written. `None` means the platform download dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportSettings {
    pub downloads_dir: Option<String>,
}
