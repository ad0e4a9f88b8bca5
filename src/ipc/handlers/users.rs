use crate::ipc::error::{err, ok, validation_failed};
use crate::ipc::handlers::param_i64;
use crate::ipc::types::{AppState, Request};
use crate::model::{User, UNASSIGNED_ID};
use crate::source::{self, ReloadError};
use crate::store::users::next_id;
use crate::store::Action;
use crate::validate::{self, FormValues, ValidationErrors};
use crate::view;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

/// Replaces the users collection from the data source.
///
/// On failure the current collection is kept; there is no retry.
pub(crate) fn reload(state: &mut AppState) -> Result<usize, ReloadError> {
    let Some(cfg) = state.source.as_ref() else {
        return Err(ReloadError::NoDataSource);
    };
    match source::load_users(cfg) {
        Ok(users) => {
            let count = users.len();
            state.store.dispatch(Action::UsersSet(users));
            info!(count, "users reloaded");
            Ok(count)
        }
        Err(e) => {
            warn!(error = %format!("{e:#}"), "users reload failed; keeping previous collection");
            Err(ReloadError::Load(e))
        }
    }
}

/// Why a submitted form was not stored.
#[derive(Debug)]
pub(crate) enum FormRejection {
    Invalid(ValidationErrors),
    /// The collection already holds the largest possible identity.
    IdExhausted,
}

impl FormRejection {
    pub(crate) fn response(&self, id: &str) -> serde_json::Value {
        match self {
            Self::Invalid(errors) => validation_failed(id, errors),
            Self::IdExhausted => err(id, "id_exhausted", "no user id left to assign", None),
        }
    }
}

/// Validates a submitted form and applies it: a sentinel id is added as a
/// new record, anything else replaces the record with that id.
///
/// Returns the id of the stored record.
pub(crate) fn apply_form(
    state: &mut AppState,
    values: &FormValues,
    editing: Option<&User>,
) -> Result<i64, FormRejection> {
    let record = validate::submit(values, state.store.districts(), editing, Utc::now())
        .map_err(FormRejection::Invalid)?;
    if record.id == UNASSIGNED_ID {
        // Same rule the users/add reducer applies.
        let Some(id) = next_id(&state.store.users().users) else {
            return Err(FormRejection::IdExhausted);
        };
        state.store.dispatch(Action::UsersAdd(record));
        Ok(id)
    } else {
        let id = record.id;
        state.store.dispatch(Action::UsersModify(record));
        Ok(id)
    }
}

fn parse_form(req: &Request) -> Result<FormValues, serde_json::Value> {
    serde_json::from_value(req.params.clone())
        .map_err(|e| err(&req.id, "bad_params", e.to_string(), None))
}

fn handle_users_reload(state: &mut AppState, req: &Request) -> serde_json::Value {
    match reload(state) {
        Ok(count) => ok(&req.id, json!({ "count": count })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

fn handle_users_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = &state.store;
    let v = view::view(&store.users().users, store.filter(), store.sort());
    let rows = view::display_rows(&v, store.districts());
    ok(&req.id, json!({ "items": rows, "total": v.total }))
}

fn handle_users_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let values = match parse_form(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match apply_form(state, &values, None) {
        Ok(id) => ok(&req.id, json!({ "user": state.store.find_user(id) })),
        Err(rejection) => {
            debug!(?rejection, "users.create rejected");
            rejection.response(&req.id)
        }
    }
}

fn handle_users_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(user_id) = param_i64(req, "userId") else {
        return err(&req.id, "bad_params", "missing userId", None);
    };
    let Some(existing) = state.store.find_user(user_id).cloned() else {
        return err(&req.id, "not_found", "user not found", None);
    };
    let values = match parse_form(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match apply_form(state, &values, Some(&existing)) {
        Ok(id) => ok(&req.id, json!({ "user": state.store.find_user(id) })),
        Err(rejection) => {
            debug!(?rejection, user_id, "users.update rejected");
            rejection.response(&req.id)
        }
    }
}

fn handle_users_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(user_id) = param_i64(req, "userId") else {
        return err(&req.id, "bad_params", "missing userId", None);
    };
    // Removing an unknown id is a no-op, not an error.
    let removed = state.store.find_user(user_id).is_some();
    state.store.dispatch(Action::UsersRemove(user_id));
    ok(&req.id, json!({ "removed": removed }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "users.reload" => Some(handle_users_reload(state, req)),
        "users.view" => Some(handle_users_view(state, req)),
        "users.create" => Some(handle_users_create(state, req)),
        "users.update" => Some(handle_users_update(state, req)),
        "users.delete" => Some(handle_users_delete(state, req)),
        _ => None,
    }
}
