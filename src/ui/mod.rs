//! linkqr UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The generator page is plain HTML/CSS/JS inside the WebView; it talks to
//! the Rust side over wry IPC.

pub mod webview_app;
