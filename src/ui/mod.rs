//! PantryChef window.
//!
//! Uses `wry` for the webview (WebView2 on Windows, WebKitGTK on Linux,
//! WKWebView on macOS). The recipe page is plain HTML/CSS/JS talking to the
//! Rust side over wry IPC.

pub mod webview_app;
