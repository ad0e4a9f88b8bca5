use crate::ipc::error::{err, ok};
use crate::ipc::handlers::{param_i64, users};
use crate::ipc::types::{AppState, Request};
use crate::prompt::Prompt;
use crate::store::Action;
use crate::validate::FormValues;
use serde_json::json;
use tracing::{debug, warn};

fn handle_edit_begin(state: &mut AppState, req: &Request) -> serde_json::Value {
    // No userId opens the form for a new record.
    let user = match req.params.get("userId") {
        None | Some(serde_json::Value::Null) => None,
        Some(_) => {
            let Some(user_id) = param_i64(req, "userId") else {
                return err(&req.id, "bad_params", "userId must be an integer", None);
            };
            match state.store.find_user(user_id) {
                Some(u) => Some(u.clone()),
                None => return err(&req.id, "not_found", "user not found", None),
            }
        }
    };

    let form = FormValues::from_user(user.as_ref());
    let prompt = Prompt::EditUser { user };
    let kind = prompt.kind();
    let prompt_id = state.prompts.open(prompt);
    ok(
        &req.id,
        json!({
            "promptId": prompt_id,
            "kind": kind,
            "form": form,
            "districts": state.store.districts().districts,
        }),
    )
}

fn handle_delete_begin(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(user_id) = param_i64(req, "userId") else {
        return err(&req.id, "bad_params", "missing userId", None);
    };
    let Some(user) = state.store.find_user(user_id).cloned() else {
        return err(&req.id, "not_found", "user not found", None);
    };
    let prompt = Prompt::ConfirmDelete { user };
    let kind = prompt.kind();
    let prompt_id = state.prompts.open(prompt);
    ok(&req.id, json!({ "promptId": prompt_id, "kind": kind }))
}

fn resolve_edit(
    state: &mut AppState,
    req: &Request,
    prompt_id: &str,
    value: &serde_json::Value,
) -> serde_json::Value {
    let editing = match state.prompts.get(prompt_id) {
        Ok(Prompt::EditUser { user }) => user.clone(),
        _ => return err(&req.id, "not_found", "prompt is not pending", None),
    };

    if value.is_null() {
        let _ = state.prompts.resolve(prompt_id);
        return ok(&req.id, json!({ "applied": false }));
    }

    let values: FormValues = match serde_json::from_value(value.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    // The record may have been removed while the dialog was open.
    if let Some(user) = &editing {
        if state.store.find_user(user.id).is_none() {
            debug!(user_id = user.id, prompt_id, "edited user no longer exists");
            let _ = state.prompts.resolve(prompt_id);
            return ok(&req.id, json!({ "applied": false }));
        }
    }
    // A rejected submission keeps the dialog open.
    match users::apply_form(state, &values, editing.as_ref()) {
        Ok(id) => {
            let _ = state.prompts.resolve(prompt_id);
            ok(
                &req.id,
                json!({ "applied": true, "user": state.store.find_user(id) }),
            )
        }
        Err(rejection) => {
            debug!(?rejection, prompt_id, "edit prompt submission rejected");
            rejection.response(&req.id)
        }
    }
}

fn resolve_delete(
    state: &mut AppState,
    req: &Request,
    prompt_id: &str,
    value: &serde_json::Value,
) -> serde_json::Value {
    let confirmed = match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        _ => return err(&req.id, "bad_params", "value must be a boolean", None),
    };
    let user_id = match state.prompts.resolve(prompt_id) {
        Ok(Prompt::ConfirmDelete { user }) => user.id,
        _ => return err(&req.id, "not_found", "prompt is not pending", None),
    };
    if confirmed {
        state.store.dispatch(Action::UsersRemove(user_id));
    }
    ok(&req.id, json!({ "applied": confirmed }))
}

fn handle_resolve(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(prompt_id) = req.params.get("promptId").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing promptId", None);
    };
    let value = req
        .params
        .get("value")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    let is_edit = match state.prompts.get(prompt_id) {
        Ok(prompt) => matches!(prompt, Prompt::EditUser { .. }),
        Err(e) => {
            warn!(error = %e, "prompt resolution rejected");
            return err(&req.id, "not_found", e.to_string(), None);
        }
    };
    if is_edit {
        resolve_edit(state, req, prompt_id, &value)
    } else {
        resolve_delete(state, req, prompt_id, &value)
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "users.editBegin" => Some(handle_edit_begin(state, req)),
        "users.deleteBegin" => Some(handle_delete_begin(state, req)),
        "prompts.resolve" => Some(handle_resolve(state, req)),
        _ => None,
    }
}
