//! Download Manager for linkqr.
//!
//! Saves the currently selected QR image as `qrcode-<hostname>.png`. The
//! destination is abstracted behind [`ExportSink`]; the desktop build writes
//! into a downloads directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::services::qr_encoder::decode_png_data_url;
use crate::services::url_validator::host_of;
use crate::types::entry::QrCodeEntry;
use crate::types::errors::ExportError;

/// Host-provided "save bytes as a file with this suggested name" primitive.
pub trait ExportSink {
    /// Stores `bytes` and returns where they ended up.
    fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory, creating it on first use.
pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ExportSink for DirectoryExportSink {
    fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| ExportError::FileSystemError(e.to_string()))?;
        let path = self.dir.join(suggested_name);
        fs::write(&path, bytes).map_err(|e| ExportError::FileSystemError(e.to_string()))?;
        Ok(path)
    }
}

/// Suggested file name for a QR image of `url`: `qrcode-<hostname>.png`.
///
/// Characters that are unsafe in file names are replaced with `_`. Falls
/// back to `qrcode.png` when the URL has no host.
pub fn export_filename(url: &str) -> String {
    match host_of(url) {
        Some(host) => {
            let safe: String = host
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            format!("qrcode-{}.png", safe)
        }
        None => "qrcode.png".to_string(),
    }
}

/// Exports QR images through an [`ExportSink`].
pub struct DownloadManager {
    sink: Box<dyn ExportSink>,
}

impl DownloadManager {
    pub fn new(sink: Box<dyn ExportSink>) -> Self {
        Self { sink }
    }

    /// Saves `selection`'s image. Returns `Ok(None)` when nothing is selected.
    pub fn export(&self, selection: Option<&QrCodeEntry>) -> Result<Option<PathBuf>, ExportError> {
        let entry = match selection {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let bytes = decode_png_data_url(&entry.image).ok_or_else(|| {
            ExportError::InvalidPayload(format!("entry {} is not a PNG data URL", entry.id))
        })?;
        let name = export_filename(&entry.url);
        let path = self.sink.save(&name, &bytes)?;

        info!(path = %path.display(), "QR code exported");
        Ok(Some(path))
    }
}
