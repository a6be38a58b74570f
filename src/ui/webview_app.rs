//! Native recipe page using `wry` + `tao`.
//!
//! Architecture:
//! - The page is served from the `pantrychef://` custom protocol.
//! - IPC from JS → Rust via `window.ipc.postMessage({method, params})`.
//! - A worker thread owns the [`App`] and runs each message through
//!   [`handle_method`], one at a time.
//! - Replies come back through the event loop proxy and are replayed in the
//!   page by `window.__pc_apply(...)`.
//! - The page never leaves the custom protocol: a redirect to the server's
//!   login page becomes the in-page login form, which signs in over IPC.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use log::{debug, error, info, warn};
use serde_json::{json, Value};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use tokio::sync::Mutex;
use wry::WebViewBuilder;

use crate::app::App;
use crate::platform;
use crate::rpc_handler::handle_method;
use crate::services::recipe_api::endpoint;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::settings::ServerSettings;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const PAGE_BODY: &str = include_str!("../../resources/ui/index.html");
const PAGE_CSS: &str = include_str!("../../resources/ui/styles.css");
const PAGE_JS: &str = include_str!("../../resources/ui/app.js");

fn page_html() -> String {
    let mut html = String::with_capacity(PAGE_BODY.len() + PAGE_CSS.len() + PAGE_JS.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>PantryChef</title><style>");
    html.push_str(PAGE_CSS);
    html.push_str("</style></head><body>");
    html.push_str(PAGE_BODY);
    html.push_str("<script>");
    html.push_str(PAGE_JS);
    html.push_str("</script></body></html>");
    html
}

/// Turns navigation to the login page into `show_login` and makes any other
/// `navigate` path absolute against the server base URL.
fn route_navigation(result: &mut Value, server: &ServerSettings) {
    let Some(commands) = result.get_mut("commands").and_then(|c| c.as_array_mut()) else {
        return;
    };
    for command in commands {
        if command.get("op").and_then(|o| o.as_str()) != Some("navigate") {
            continue;
        }
        let Some(path) = command.get("path").and_then(|p| p.as_str()).map(str::to_string) else {
            continue;
        };
        if path == server.login_path {
            let delay_ms = command.get("delay_ms").cloned().unwrap_or(json!(0));
            *command = json!({"op": "show_login", "delay_ms": delay_ms});
            continue;
        }
        match endpoint(&server.base_url, &path) {
            Ok(url) => command["path"] = Value::String(url.to_string()),
            Err(e) => warn!("cannot resolve navigation to {}: {}", path, e),
        }
    }
}

async fn dispatch(app: &Mutex<App>, message: &str) -> Value {
    let request: Value = match serde_json::from_str(message) {
        Ok(v) => v,
        Err(e) => return json!({"error": format!("parse error: {}", e)}),
    };
    let method = request.get("method").and_then(|m| m.as_str()).unwrap_or("");
    let params = request.get("params").cloned().unwrap_or(json!({}));
    debug!("[IPC] {}", method);

    match handle_method(app, method, &params).await {
        Ok(mut result) => {
            let server = app.lock().await.settings_engine.get_settings().server.clone();
            route_navigation(&mut result, &server);
            json!({"result": result})
        }
        Err(e) => {
            warn!("{} failed: {}", method, e);
            json!({"error": e})
        }
    }
}

/// Starts the worker that owns the [`App`]. The app is built on the worker
/// thread itself; startup errors are returned before any window opens.
fn spawn_worker(
    db_path: PathBuf,
    proxy: EventLoopProxy<UserEvent>,
) -> Result<mpsc::Sender<String>, Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel::<String>();
    let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);

    thread::Builder::new().name("pantrychef-worker".into()).spawn(move || {
        let started = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| e.to_string())
            .and_then(|rt| {
                App::new(&db_path.to_string_lossy(), None)
                    .map(|app| (rt, app))
                    .map_err(|e| e.to_string())
            });
        let (runtime, app) = match started {
            Ok(parts) => {
                let _ = ready_tx.send(Ok(()));
                parts
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        let app = Mutex::new(app);
        for message in rx {
            let reply = runtime.block_on(dispatch(&app, &message));
            let script = format!("if(window.__pc_apply)window.__pc_apply({})", reply);
            if proxy.send_event(UserEvent::EvalScript(script)).is_err() {
                break;
            }
        }
    })?;

    ready_rx.recv()??;
    Ok(tx)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = platform::get_data_dir();
    std::fs::create_dir_all(&dir)?;
    let db_path = dir.join("pantrychef.db");
    info!("local storage at {}", db_path.display());

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let worker = spawn_worker(db_path, event_loop.create_proxy())?;

    let window = WindowBuilder::new()
        .with_title("PantryChef")
        .with_inner_size(tao::dpi::LogicalSize::new(1100.0, 820.0))
        .build(&event_loop)?;

    let builder = WebViewBuilder::new()
        .with_custom_protocol("pantrychef".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(page_html().into_bytes().into())
                .unwrap_or_else(|_| wry::http::Response::new(Vec::new().into()))
        })
        .with_url("pantrychef://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            if worker.send(msg.body().clone()).is_err() {
                error!("worker thread is gone, dropping page event");
            }
        })
        .with_new_window_req_handler(|url, _features| {
            debug!("[NW] {}", url);
            wry::NewWindowResponse::Allow
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("GTK vbox unavailable")?;
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
            } => *control_flow = ControlFlow::Exit,

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                if let Err(e) = webview.evaluate_script(&js) {
                    warn!("script failed: {}", e);
                }
            }

            _ => {}
        }
    });
}
