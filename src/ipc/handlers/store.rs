use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::UNASSIGNED_ID;
use crate::store::users::next_id;
use crate::store::Action;
use serde_json::json;

fn handle_store_dispatch(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(raw) = req.params.get("action") else {
        return err(&req.id, "bad_params", "missing action", None);
    };
    let action: Action = match serde_json::from_value(raw.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_action", e.to_string(), None),
    };
    if let Action::UsersAdd(user) = &action {
        if user.id == UNASSIGNED_ID && next_id(&state.store.users().users).is_none() {
            return err(&req.id, "id_exhausted", "no user id left to assign", None);
        }
    }
    let kind = action.kind();
    state.store.dispatch(action);
    ok(&req.id, json!({ "type": kind }))
}

fn handle_store_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(state.store.snapshot()))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "store.dispatch" => Some(handle_store_dispatch(state, req)),
        "store.state" => Some(handle_store_state(state, req)),
        _ => None,
    }
}
