//! PantryChef RPC server: JSON-RPC over stdin/stdout for a page host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"recipes.generate", "params":{"pantry":"...","diet":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Requests are handled one at a time, in arrival order.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::{error, info};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use pantrychef::app::App;
use pantrychef::platform;
use pantrychef::rpc_handler::handle_method;

/// Directory holding `pantrychef.db`: `$PANTRYCHEF_DATA_DIR`, else the platform data dir.
fn data_dir() -> PathBuf {
    match std::env::var("PANTRYCHEF_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => platform::get_data_dir(),
    }
}

fn emit(line: &Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", line)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    let db_path = dir.join("pantrychef.db");
    info!("local storage at {}", db_path.display());

    let app = Mutex::new(App::new(&db_path.to_string_lossy(), None)?);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin closed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match runtime.block_on(handle_method(&app, method, &params)) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        emit(&response)?;
    }

    Ok(())
}
