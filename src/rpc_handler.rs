//! RPC method handler for the linkqr JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested independently.
//! `handle_method` dispatches calls to the managers owned by [`App`].

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::session_manager::{run_encoder, SessionManagerTrait};
use crate::services::settings_engine::SettingsEngineTrait;

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// The app lock is released while the encoder runs.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── QR codes ───
        "qr.generate" => {
            let input = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let (url, encoder) = {
                let mut a = app.lock().map_err(|e| e.to_string())?;
                let url = a.session_manager.begin_generate(input).map_err(|e| e.to_string())?;
                (url, a.encoder.clone())
            };
            let result = run_encoder(encoder, url).await;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let entry = a.session_manager.complete_generate(result).map_err(|e| e.to_string())?;
            to_json(&entry)
        }
        "qr.current" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(&a.session_manager.current_selection())
        }
        "qr.state" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(&a.session_manager.snapshot())
        }

        // ─── History ───
        "history.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(&a.session_manager.history())
        }
        "history.select" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let entry = a
                .session_manager
                .select(id)
                .ok_or_else(|| format!("history entry not found: {}", id))?;
            to_json(entry)
        }
        "history.clear" => {
            let confirmed = params.get("confirm").and_then(|v| v.as_bool()).unwrap_or(false);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if !a.session_manager.clear_history(confirmed) {
                return Err("clearing history requires confirm: true".to_string());
            }
            Ok(json!({"ok": true}))
        }

        // ─── Download ───
        "download.export" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let saved = a
                .download_manager
                .export(a.session_manager.current_selection())
                .map_err(|e| e.to_string())?;
            Ok(json!({"path": saved.map(|p| p.to_string_lossy().to_string())}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            to_json(a.settings_engine.get_settings())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.apply_settings();
            Ok(json!({"ok": true}))
        }

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
