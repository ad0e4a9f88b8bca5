use crate::config::DataSourceConfig;
use crate::ipc::error::{err, ok};
use crate::ipc::handlers::{districts, users};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "dataPath": state.source.as_ref().map(|s| s.path.to_string_lossy().to_string()),
            "pendingPrompts": state.prompts.len()
        }),
    )
}

fn handle_data_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let cfg: DataSourceConfig = match serde_json::from_value(req.params.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    let path = cfg.path.to_string_lossy().to_string();
    state.source = Some(cfg);

    // Each collection reloads on its own; a failure leaves that one as it was.
    let users_loaded = users::reload(state).ok();
    let districts_loaded = districts::reload(state).ok();

    ok(
        &req.id,
        json!({
            "dataPath": path,
            "usersLoaded": users_loaded,
            "districtsLoaded": districts_loaded
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "data.select" => Some(handle_data_select(state, req)),
        _ => None,
    }
}
