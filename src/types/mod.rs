// linkqr shared type definitions
// Each submodule defines types used across the application.

pub mod entry;
pub mod errors;
pub mod settings;
