//! WebView-based generator window using `wry` + `tao`.
//!
//! Architecture:
//! - The single page is served via the `qr://` custom protocol.
//! - IPC from JS → Rust via `window.ipc.postMessage()`.
//! - Rust → JS by evaluating `__qr_render(state)` with a JSON snapshot.
//! - Encoding runs on a tokio blocking task; its result comes back to the
//!   event loop as [`UserEvent::EncodeFinished`] and is applied there.

use std::sync::{Arc, Mutex};

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use tokio::runtime::Runtime;
use tracing::{debug, error, warn};
use wry::WebViewBuilder;

use crate::app::App;
use crate::managers::session_manager::{run_encoder, SessionManagerTrait};
use crate::services::settings_engine::SettingsEngine;
use crate::types::errors::EncodeError;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
    EncodeFinished(Result<String, EncodeError>),
}

struct GeneratorState {
    app: App,
}

/// Handles that let IPC commands start work off the UI thread.
struct Background {
    runtime: Runtime,
    proxy: EventLoopProxy<UserEvent>,
}

const APP_HTML: &str = include_str!("../../resources/ui/app.html");
const APP_CSS: &str = include_str!("../../resources/ui/app.css");
const APP_JS: &str = include_str!("../../resources/ui/app.js");

fn page_html() -> String {
    let mut html = String::with_capacity(APP_HTML.len() + APP_CSS.len() + APP_JS.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>linkqr</title><style>");
    html.push_str(APP_CSS);
    html.push_str("</style></head><body>");
    html.push_str(APP_HTML);
    html.push_str("<script>");
    html.push_str(APP_JS);
    html.push_str("</script></body></html>");
    html
}

// ─── IPC handler ───

fn handle_ipc(state: &mut GeneratorState, message: &str, bg: &Background) -> Option<UserEvent> {
    let msg: serde_json::Value = serde_json::from_str(message).ok()?;
    let cmd = msg.get("cmd")?.as_str()?;

    match cmd {
        "ui_ready" => Some(render_event(state)),

        "generate" => {
            let input = msg.get("url").and_then(|v| v.as_str()).unwrap_or("");
            if let Ok(url) = state.app.session_manager.begin_generate(input) {
                let encoder = state.app.encoder.clone();
                let proxy = bg.proxy.clone();
                bg.runtime.spawn(async move {
                    let result = run_encoder(encoder, url).await;
                    if proxy.send_event(UserEvent::EncodeFinished(result)).is_err() {
                        warn!("event loop closed before encode finished");
                    }
                });
            }
            Some(render_event(state))
        }

        "select" => {
            if let Some(id) = msg.get("id").and_then(|v| v.as_str()) {
                state.app.session_manager.select(id);
            }
            Some(render_event(state))
        }

        "clear" => {
            let confirmed = msg.get("confirmed").and_then(|v| v.as_bool()).unwrap_or(false);
            if state.app.session_manager.clear_history(confirmed) {
                Some(render_event(state))
            } else {
                None
            }
        }

        "download" => {
            let result = state
                .app
                .download_manager
                .export(state.app.session_manager.current_selection());
            let text = match result {
                Ok(Some(path)) => format!("Saved to {}", path.display()),
                Ok(None) => return None,
                Err(e) => {
                    warn!(error = %e, "export failed");
                    "Download failed".to_string()
                }
            };
            Some(UserEvent::EvalScript(format!(
                "if(window.__qr_toast)__qr_toast({})",
                serde_json::Value::String(text)
            )))
        }

        _ => None,
    }
}

fn render_event(state: &GeneratorState) -> UserEvent {
    UserEvent::EvalScript(build_render_script(state))
}

fn build_render_script(state: &GeneratorState) -> String {
    let snapshot = serde_json::to_string(&state.app.session_manager.snapshot())
        .unwrap_or_else(|_| "{}".to_string());
    format!("if(window.__qr_render)__qr_render({})", snapshot)
}

// ─── Main entry point ───

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_settings(SettingsEngine::new(None))?;
    app.startup();
    let state = Arc::new(Mutex::new(GeneratorState { app }));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let bg = Background {
        runtime: Runtime::new()?,
        proxy: event_loop.create_proxy(),
    };

    let window = WindowBuilder::new()
        .with_title("linkqr")
        .with_inner_size(tao::dpi::LogicalSize::new(720.0, 860.0))
        .build(&event_loop)?;

    let ipc_state = state.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol("qr".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(page_html().into_bytes().into())
                .unwrap_or_else(|_| wry::http::Response::new(Vec::new().into()))
        })
        .with_url("qr://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            let preview: String = body.chars().take(200).collect();
            debug!(body = %preview, "ipc");
            let event = match ipc_state.lock() {
                Ok(mut s) => handle_ipc(&mut s, body, &bg),
                Err(e) => {
                    error!(error = %e, "generator state poisoned");
                    None
                }
            };
            if let Some(event) = event {
                let _ = bg.proxy.send_event(event);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("failed to get GTK vbox")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if let Ok(mut s) = state.lock() {
                    s.app.shutdown();
                }
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(UserEvent::EncodeFinished(result)) => {
                let script = match state.lock() {
                    Ok(mut s) => {
                        // Encode failures are recorded on the session and shown by the render.
                        if let Err(e) = s.app.session_manager.complete_generate(result) {
                            debug!(error = %e, "generate finished without a new entry");
                        }
                        build_render_script(&s)
                    }
                    Err(_) => return,
                };
                let _ = webview.evaluate_script(&script);
            }

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                let _ = webview.evaluate_script(&js);
            }

            _ => {}
        }
    });
}
