// linkqr state managers
// Managers handle stateful operations: the history list, its storage, the live session, downloads.

pub mod download_manager;
pub mod history_manager;
pub mod history_store;
pub mod session_manager;
