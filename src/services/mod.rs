// linkqr services
// Services provide stateless or configuration functionality: URL validation, QR encoding, settings.

pub mod qr_encoder;
pub mod settings_engine;
pub mod url_validator;
