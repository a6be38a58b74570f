//! RPC method handler for the PantryChef JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches page events to the recipe board. Methods that
//! touch the page answer with `{"commands": [...]}` for the host to replay.

use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::App;
use crate::managers::history_manager::HistoryManagerTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::view_surface::ViewCommands;
use crate::types::recipe::{GenerateForm, LoginRequest};
use crate::types::view::UiElement;

fn commands_json(view: ViewCommands) -> Result<Value, String> {
    let commands = serde_json::to_value(view.into_commands()).map_err(|e| e.to_string())?;
    Ok(json!({ "commands": commands }))
}

fn card_index(params: &Value) -> Result<usize, String> {
    params
        .get("index")
        .and_then(|v| v.as_u64())
        .map(|i| i as usize)
        .ok_or_else(|| "missing index".to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Page ───
        "ui.ready" => {
            let elements: Vec<UiElement> = match params.get("elements") {
                Some(v) => serde_json::from_value(v.clone()).map_err(|e| format!("invalid elements: {}", e))?,
                None => UiElement::ALL.to_vec(),
            };
            let speech = params.get("speech").and_then(|v| v.as_bool()).unwrap_or(true);
            let mut a = app.lock().await;
            a.set_page(elements, speech);
            let mut view = a.view();
            a.board.refresh_history(&mut view);
            commands_json(view)
        }

        // ─── Session ───
        "auth.login" => {
            let credentials: LoginRequest = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid credentials: {}", e))?;
            let a = app.lock().await;
            let mut view = a.view();
            let signed_in = a.board.login(&mut view, &credentials).await.is_ok();
            let mut result = commands_json(view)?;
            result["signed_in"] = json!(signed_in);
            Ok(result)
        }

        // ─── Recipes ───
        "recipes.generate" => {
            let form: GenerateForm = serde_json::from_value(params.clone()).map_err(|e| e.to_string())?;
            let mut a = app.lock().await;
            let mut view = a.view();
            let outcome = a.board.generate(&mut view, &form).await;
            let mut result = commands_json(view)?;
            result["outcome"] = serde_json::to_value(outcome).map_err(|e| e.to_string())?;
            Ok(result)
        }

        // ─── Cards ───
        "card.save" => {
            let index = card_index(params)?;
            let a = app.lock().await;
            let mut view = a.view();
            a.board.save_card(&mut view, index).await.map_err(|e| e.to_string())?;
            commands_json(view)
        }
        "card.speak" => {
            let index = card_index(params)?;
            let a = app.lock().await;
            let mut view = a.view();
            a.board.speak_card(&mut view, index).map_err(|e| e.to_string())?;
            commands_json(view)
        }
        "card.open" => {
            let index = card_index(params)?;
            let a = app.lock().await;
            let mut view = a.view();
            a.board.open_card(&mut view, index).map_err(|e| e.to_string())?;
            commands_json(view)
        }

        // ─── History ───
        "history.list" => {
            let a = app.lock().await;
            let entries = a.board.history().load();
            serde_json::to_value(entries).map_err(|e| e.to_string())
        }
        "history.select" => {
            let id = params.get("id").and_then(|v| v.as_i64()).ok_or("missing id")?;
            let mut a = app.lock().await;
            let mut view = a.view();
            a.board.select_history(&mut view, id).map_err(|e| e.to_string())?;
            commands_json(view)
        }
        "history.clear" => {
            let mut a = app.lock().await;
            let mut view = a.view();
            a.board.clear_history(&mut view).map_err(|e| e.to_string())?;
            commands_json(view)
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().await;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().await;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.reconfigure().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
