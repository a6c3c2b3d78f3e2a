//! URL input validation.
//!
//! Accepts strings that, once trimmed, parse as absolute URLs with a host
//! under the WHATWG rules implemented by the `url` crate.

use url::Url;

use crate::types::errors::ValidationError;

/// Validates user input and returns the trimmed URL string to encode.
pub fn validate_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let parsed = Url::parse(trimmed).map_err(|_| ValidationError::Malformed(trimmed.to_string()))?;

    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(ValidationError::MissingHost(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

/// Returns `true` if `raw` would pass [`validate_url`].
pub fn is_valid_url(raw: &str) -> bool {
    validate_url(raw).is_ok()
}

/// Extracts the host component (e.g. `example.com`) of a URL.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_string())
}
