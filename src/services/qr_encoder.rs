//! QR encoding service.
//!
//! Wraps the `qrcode` crate behind [`QrEncoder`] and renders symbols to PNG
//! data URLs with the `image` crate. Rendering options are fixed: high error
//! correction, a one-module quiet zone, black modules on a white background.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};

use crate::types::errors::EncodeError;
use crate::types::settings::{DEFAULT_MODULE_SCALE, MAX_MODULE_SCALE};

/// Prefix of every payload produced by [`PngQrEncoder`].
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Quiet-zone width in modules.
pub const MARGIN_MODULES: u32 = 1;

/// Error correction level used for every symbol.
pub const ERROR_CORRECTION: EcLevel = EcLevel::H;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Turns text into a displayable image payload.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<String, EncodeError>;
}

/// Encoder producing `data:image/png;base64,...` payloads.
#[derive(Debug, Clone)]
pub struct PngQrEncoder {
    module_scale: u32,
}

impl Default for PngQrEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_SCALE)
    }
}

impl PngQrEncoder {
    /// `module_scale` is the side length in pixels of one module, clamped
    /// to `1..=MAX_MODULE_SCALE`.
    pub fn new(module_scale: u32) -> Self {
        Self {
            module_scale: module_scale.clamp(1, MAX_MODULE_SCALE),
        }
    }

    pub fn module_scale(&self) -> u32 {
        self.module_scale
    }

    /// Rasterizes a symbol, quiet zone included.
    pub fn render(&self, code: &QrCode) -> Result<GrayImage, EncodeError> {
        let width = code.width() as u32;
        let scale = self.module_scale;
        let side = width
            .checked_add(2 * MARGIN_MODULES)
            .and_then(|w| w.checked_mul(scale))
            .ok_or_else(|| EncodeError::Render(format!("image side overflows at scale {}", scale)))?;
        let mut img = GrayImage::from_pixel(side, side, LIGHT);

        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let mx = i as u32 % width + MARGIN_MODULES;
            let my = i as u32 / width + MARGIN_MODULES;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(mx * scale + dx, my * scale + dy, DARK);
                }
            }
        }
        Ok(img)
    }

    /// Encodes `text` into PNG bytes.
    pub fn encode_png(&self, text: &str) -> Result<Vec<u8>, EncodeError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), ERROR_CORRECTION)
            .map_err(map_qr_error)?;
        let img = self.render(&code)?;

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| EncodeError::Render(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

impl QrEncoder for PngQrEncoder {
    fn encode(&self, text: &str) -> Result<String, EncodeError> {
        let png = self.encode_png(text)?;
        Ok(format!("{}{}", PNG_DATA_URL_PREFIX, BASE64.encode(png)))
    }
}

fn map_qr_error(e: QrError) -> EncodeError {
    match e {
        QrError::DataTooLong => EncodeError::DataTooLong,
        other => EncodeError::Rejected(other.to_string()),
    }
}

/// Decodes a payload produced by [`PngQrEncoder`] back into PNG bytes.
pub fn decode_png_data_url(payload: &str) -> Option<Vec<u8>> {
    let b64 = payload.strip_prefix(PNG_DATA_URL_PREFIX)?;
    BASE64.decode(b64).ok()
}
