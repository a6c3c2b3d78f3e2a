use std::fmt;

/// Message shown when the URL input is rejected.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";

/// Message shown when the encoder fails.
pub const ENCODE_FAILED_MESSAGE: &str = "Failed to generate QR code. Please try again.";

// === ValidationError ===

/// Errors produced while validating user-entered URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty or whitespace only.
    Empty,
    /// Input did not parse as an absolute URL.
    Malformed(String),
    /// Input parsed but has no host (e.g. `mailto:` or `data:` URLs).
    MissingHost(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "URL is empty"),
            ValidationError::Malformed(input) => write!(f, "Malformed URL: {}", input),
            ValidationError::MissingHost(input) => write!(f, "URL has no host: {}", input),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// The message presented to the user for any validation failure.
    pub fn user_message(&self) -> &'static str {
        INVALID_URL_MESSAGE
    }
}

// === EncodeError ===

/// Errors produced by the QR encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The text does not fit in any QR version at the requested level.
    DataTooLong,
    /// The encoder rejected the input for another reason.
    Rejected(String),
    /// Rasterizing or PNG-encoding the symbol failed.
    Render(String),
    /// The background encode task panicked or was dropped.
    TaskFailed(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::DataTooLong => write!(f, "Input too long for a QR code"),
            EncodeError::Rejected(msg) => write!(f, "Encoder rejected input: {}", msg),
            EncodeError::Render(msg) => write!(f, "Failed to render QR image: {}", msg),
            EncodeError::TaskFailed(msg) => write!(f, "Encode task failed: {}", msg),
        }
    }
}

impl std::error::Error for EncodeError {}

// === GenerateError ===

/// Errors surfaced by the session's generate flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The input failed URL validation.
    Invalid(ValidationError),
    /// The encoder failed.
    Encode(EncodeError),
    /// Another generate is already in flight.
    Busy,
    /// `complete_generate` was called without a matching `begin_generate`.
    NotPending,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Invalid(_) => write!(f, "{}", INVALID_URL_MESSAGE),
            GenerateError::Encode(_) => write!(f, "{}", ENCODE_FAILED_MESSAGE),
            GenerateError::Busy => write!(f, "A QR code is already being generated"),
            GenerateError::NotPending => write!(f, "No QR code generation is pending"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Invalid(e) => Some(e),
            GenerateError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for GenerateError {
    fn from(e: ValidationError) -> Self {
        GenerateError::Invalid(e)
    }
}

impl From<EncodeError> for GenerateError {
    fn from(e: EncodeError) -> Self {
        GenerateError::Encode(e)
    }
}

// === StorageError ===

/// Errors related to the durable key-value store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading a key failed.
    ReadFailed(String),
    /// Writing or deleting a key failed.
    WriteFailed(String),
    /// The stored value could not be parsed or serialized.
    SerializationError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Storage read failed: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Storage write failed: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === ExportError ===

/// Errors related to saving a QR image to disk.
#[derive(Debug)]
pub enum ExportError {
    /// The image payload is not a base64 PNG data URL.
    InvalidPayload(String),
    /// A file system error occurred.
    FileSystemError(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::InvalidPayload(msg) => write!(f, "Invalid image payload: {}", msg),
            ExportError::FileSystemError(msg) => {
                write!(f, "Export file system error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ExportError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}
