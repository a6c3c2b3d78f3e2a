use serde::{Deserialize, Serialize};

/// One generated QR code record.
///
/// Serialized with camelCase keys so a stored history reads the same as the
/// page-side state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeEntry {
    pub id: String,
    pub url: String,
    /// Self-contained `data:image/png;base64,...` payload.
    pub image: String,
    /// Milliseconds since the UNIX epoch.
    pub created_at: i64,
}

impl QrCodeEntry {
    /// Builds an entry whose id is derived from its creation timestamp.
    pub fn new(url: &str, image: String, created_at: i64) -> Self {
        Self {
            id: created_at.to_string(),
            url: url.to_string(),
            image,
            created_at,
        }
    }
}
